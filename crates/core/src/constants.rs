//! Constants used throughout the core crate.

/// Default location of the SQLite database when no explicit path is configured.
pub const DEFAULT_DATABASE_PATH: &str = "data/entrevistas.db";

/// Default bind address of the REST API.
pub const DEFAULT_REST_ADDR: &str = "0.0.0.0:3000";

/// Environment variable holding the database path.
pub const DATABASE_PATH_ENV: &str = "ENTREVISTAS_DB_PATH";

/// Environment variable holding the REST bind address.
pub const REST_ADDR_ENV: &str = "ENTREVISTAS_REST_ADDR";

/// Upper bound on free-text fields accepted from callers.
pub const MAX_TEXT_LEN: usize = 20_000;

/// Upper bound on tag names.
pub const MAX_TAG_NAME_LEN: usize = 255;
