//! User management CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use torum_core::config::AppConfig;
use torum_core::error::AppError;
use torum_core::types::pagination::{MAX_PAGE_SIZE, PageRequest};
use torum_database::repositories::UserRepository;
use torum_entity::user::{User, UserRole};

use crate::output::{self, OutputFormat};

/// Arguments for user commands
#[derive(Debug, Args)]
pub struct UserArgs {
    /// User subcommand
    #[command(subcommand)]
    pub command: UserCommand,
}

/// User subcommands
#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// List all users
    List {
        /// Filter by role (user, moderator, admin)
        #[arg(short, long)]
        role: Option<String>,
    },
    /// Change a user's role
    SetRole {
        /// Email of the account
        email: String,
        /// New role (user, moderator, admin)
        role: String,
    },
}

/// User display row for table output
#[derive(Debug, Serialize, Tabled)]
pub(crate) struct UserRow {
    /// User ID
    id: String,
    /// Username
    username: String,
    /// Email
    email: String,
    /// Role
    role: String,
    /// Created at
    created_at: String,
}

impl From<&User> for UserRow {
    fn from(user: &User) -> Self {
        Self {
            id: user.user_id.to_string(),
            username: user.username.clone(),
            email: user.email.clone(),
            role: user.user_role.to_string(),
            created_at: user.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Execute user commands
pub async fn execute(
    args: &UserArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let pool = super::create_db_pool(config).await?;
    let user_repo = UserRepository::new(pool.pool().clone());

    match &args.command {
        UserCommand::List { role } => {
            let role = role.as_deref().map(str::parse::<UserRole>).transpose()?;

            let mut rows = Vec::new();
            let mut page = PageRequest::new(1, MAX_PAGE_SIZE);
            loop {
                let batch = user_repo.find_all(role, &page).await?;
                rows.extend(batch.items.iter().map(UserRow::from));
                if !batch.has_next {
                    break;
                }
                page = PageRequest::new(page.page + 1, MAX_PAGE_SIZE);
            }

            output::print_list(&rows, format);
        }
        UserCommand::SetRole { email, role } => {
            let role: UserRole = role.parse()?;
            let user = user_repo
                .find_by_email(email)
                .await?
                .ok_or_else(|| AppError::not_found(format!("User '{email}' not found")))?;

            let updated = user_repo.update_role(user.user_id, role).await?;
            output::print_item(&UserRow::from(&updated), format);
            output::print_success(&format!("Role of '{email}' set to {role}"));
        }
    }

    pool.close().await;
    Ok(())
}
