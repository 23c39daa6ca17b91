//! Entrevistas service binary.
//!
//! Loads `.env`, resolves configuration once, opens the note store and serves the REST API.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::AppState;
use entrevistas_core::{CoreConfig, NoteStore};

/// Main entry point for the Entrevistas service
///
/// # Environment Variables
/// - `ENTREVISTAS_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `ENTREVISTAS_DB_PATH`: SQLite database file (default: "data/entrevistas.db")
/// - `RUST_LOG`: tracing filter, added on top of the crate defaults
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the configuration is invalid or the database cannot be opened, or
/// - the server address cannot be bound or the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("entrevistas_run=info".parse()?)
                .add_directive("entrevistas_core=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = CoreConfig::from_env()?;

    tracing::info!("++ Starting Entrevistas REST on {}", cfg.rest_addr());

    let store = Arc::new(NoteStore::open(cfg.database_path())?);
    api_rest::serve(AppState::new(store), cfg.rest_addr()).await?;

    Ok(())
}
