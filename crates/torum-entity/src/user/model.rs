//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::role::UserRole;

/// A registered forum account.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Primary key.
    pub user_id: Uuid,
    /// Display name, not unique.
    pub username: String,
    /// Login identifier, unique case-insensitively.
    pub email: String,
    /// Argon2id password hash (never serialized to API responses).
    #[serde(skip_serializing)]
    pub hashed_password: String,
    /// RBAC role.
    pub user_role: UserRole,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account was last modified.
    pub updated_at: DateTime<Utc>,
}

/// Data required to insert a new user.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
    pub hashed_password: String,
    pub user_role: UserRole,
}

/// Partial update of a user's own account.
#[derive(Debug, Clone, Default)]
pub struct UpdateUser {
    pub username: Option<String>,
    pub hashed_password: Option<String>,
}

impl UpdateUser {
    /// Whether the update changes nothing.
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.hashed_password.is_none()
    }
}
