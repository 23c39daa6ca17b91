//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into core services, so
//! request handling never reads process-wide environment variables.

use crate::constants::{DATABASE_PATH_ENV, DEFAULT_DATABASE_PATH, DEFAULT_REST_ADDR, REST_ADDR_ENV};
use crate::{EntrevistaError, EntrevistaResult};
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    database_path: PathBuf,
    rest_addr: String,
}

impl CoreConfig {
    pub fn new(database_path: PathBuf, rest_addr: String) -> EntrevistaResult<Self> {
        if database_path.as_os_str().is_empty() {
            return Err(EntrevistaError::InvalidInput(
                "database path cannot be empty".into(),
            ));
        }
        if rest_addr.trim().is_empty() {
            return Err(EntrevistaError::InvalidInput(
                "REST address cannot be empty".into(),
            ));
        }

        Ok(Self {
            database_path,
            rest_addr,
        })
    }

    /// Build the configuration from optional raw values (typically environment variables).
    ///
    /// Missing or blank values fall back to the defaults in [`crate::constants`].
    pub fn from_values(
        database_path: Option<String>,
        rest_addr: Option<String>,
    ) -> EntrevistaResult<Self> {
        let database_path = non_blank(database_path).unwrap_or_else(|| DEFAULT_DATABASE_PATH.into());
        let rest_addr = non_blank(rest_addr).unwrap_or_else(|| DEFAULT_REST_ADDR.into());
        Self::new(PathBuf::from(database_path), rest_addr)
    }

    /// Read `ENTREVISTAS_DB_PATH` and `ENTREVISTAS_REST_ADDR`. Call once, at startup.
    pub fn from_env() -> EntrevistaResult<Self> {
        Self::from_values(
            std::env::var(DATABASE_PATH_ENV).ok(),
            std::env::var(REST_ADDR_ENV).ok(),
        )
    }

    pub fn database_path(&self) -> &Path {
        &self.database_path
    }

    pub fn rest_addr(&self) -> &str {
        &self.rest_addr
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
