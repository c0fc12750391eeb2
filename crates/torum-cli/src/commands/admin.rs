//! Admin account bootstrap commands.

use clap::{Args, Subcommand};

use torum_auth::password::{PasswordHasher, PasswordValidator};
use torum_core::config::AppConfig;
use torum_core::error::AppError;
use torum_database::repositories::UserRepository;
use torum_entity::user::{CreateUser, UserRole};

use super::user::UserRow;
use crate::output::{self, OutputFormat};

/// Arguments for admin commands
#[derive(Debug, Args)]
pub struct AdminArgs {
    /// Admin subcommand
    #[command(subcommand)]
    pub command: AdminCommand,
}

/// Admin subcommands
#[derive(Debug, Subcommand)]
pub enum AdminCommand {
    /// Create a new admin user
    Create {
        /// Username
        #[arg(short, long)]
        username: String,
        /// Email
        #[arg(short, long)]
        email: String,
        /// Password (will prompt if not provided)
        #[arg(short, long)]
        password: Option<String>,
    },
}

/// Execute admin commands
pub async fn execute(
    args: &AdminArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        AdminCommand::Create {
            username,
            email,
            password,
        } => {
            let password = match password {
                Some(p) => p.clone(),
                None => dialoguer::Password::new()
                    .with_prompt("Admin password")
                    .with_confirmation("Confirm password", "Passwords do not match")
                    .interact()
                    .map_err(|e| AppError::internal(format!("Input error: {e}")))?,
            };

            let username = username.trim();
            let email = email.trim();
            PasswordValidator::new(&config.auth).validate(&password, &[username, email])?;
            let hashed_password = PasswordHasher::new().hash_password(&password)?;

            let pool = super::create_db_pool(config).await?;
            let user_repo = UserRepository::new(pool.pool().clone());

            if user_repo.find_by_email(email).await?.is_some() {
                pool.close().await;
                return Err(AppError::conflict("Email already existed"));
            }

            let user = user_repo
                .create(&CreateUser {
                    username: username.to_string(),
                    email: email.to_string(),
                    hashed_password,
                    user_role: UserRole::Admin,
                })
                .await?;
            pool.close().await;

            output::print_item(&UserRow::from(&user), format);
            output::print_success(&format!("Admin user '{username}' created"));
        }
    }

    Ok(())
}
