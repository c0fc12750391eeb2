//! Torum server: forum backend with posts, reading documents and search.
//!
//! Main entry point that loads configuration, sets up logging, connects
//! to PostgreSQL and hands over to the HTTP server.

use anyhow::Context;
use tracing_subscriber::{EnvFilter, fmt};

use torum_core::config::AppConfig;
use torum_core::config::LoggingConfig;
use torum_database::DatabasePool;

/// Environment variable selecting the configuration overlay.
const ENV_VAR: &str = "TORUM_ENV";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = std::env::var(ENV_VAR).unwrap_or_else(|_| "development".to_string());
    let config = AppConfig::load(&env).context("Failed to load configuration")?;

    init_logging(&config.logging);
    tracing::info!(
        env = %env,
        version = env!("CARGO_PKG_VERSION"),
        "Configuration loaded"
    );

    let db_pool = DatabasePool::connect(&config.database)
        .await
        .context("Database connection failed")?;

    torum_api::run_server(config, db_pool.into_pool())
        .await
        .context("Server error")?;

    Ok(())
}

/// Initialize tracing/logging. `RUST_LOG` takes precedence over `logging.level`.
fn init_logging(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    match config.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}
