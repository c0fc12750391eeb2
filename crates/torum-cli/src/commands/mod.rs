//! CLI command definitions and dispatch.

pub mod admin;
pub mod migrate;
pub mod user;

use clap::{Parser, Subcommand};

use torum_core::config::AppConfig;
use torum_core::error::AppError;
use torum_database::DatabasePool;

use crate::output::OutputFormat;

/// Environment variable selecting the configuration overlay.
const ENV_VAR: &str = "TORUM_ENV";

/// Torum forum backend administration
#[derive(Debug, Parser)]
#[command(name = "torum", version, about, long_about = None)]
pub struct Cli {
    /// Directory holding `default.toml` and environment overlays
    #[arg(short, long, default_value = "config")]
    pub config_dir: String,

    /// Environment overlay to load (defaults to $TORUM_ENV, then "development")
    #[arg(short, long)]
    pub env: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// Admin account bootstrap
    Admin(admin::AdminArgs),
    /// User management
    User(user::UserArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        let config = self.load_config()?;
        match &self.command {
            Commands::Migrate(args) => migrate::execute(args, &config).await,
            Commands::Admin(args) => admin::execute(args, &config, self.format).await,
            Commands::User(args) => user::execute(args, &config, self.format).await,
        }
    }

    fn load_config(&self) -> Result<AppConfig, AppError> {
        let env = self
            .env
            .clone()
            .or_else(|| std::env::var(ENV_VAR).ok())
            .unwrap_or_else(|| "development".to_string());
        AppConfig::load_from(&self.config_dir, &env)
    }
}

/// Helper: create database pool from config
pub async fn create_db_pool(config: &AppConfig) -> Result<DatabasePool, AppError> {
    DatabasePool::connect(&config.database).await
}
