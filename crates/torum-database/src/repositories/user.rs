//! User repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use torum_core::error::{AppError, ErrorKind};
use torum_core::result::AppResult;
use torum_core::types::pagination::{PageRequest, PageResponse};
use torum_entity::user::model::{CreateUser, UpdateUser};
use torum_entity::user::{User, UserRole};

/// Unique index on `LOWER(email)`.
const EMAIL_UNIQUE_INDEX: &str = "users_email_key";

/// Repository for user CRUD and query operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a user by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE user_id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user by id", e))
    }

    /// Find a user by email (case-insensitive).
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE LOWER(email) = LOWER($1)")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user by email", e)
            })
    }

    /// List users with pagination, newest first, optionally filtered by role.
    pub async fn find_all(
        &self,
        role: Option<UserRole>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<User>> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE ($1::user_role IS NULL OR user_role = $1)")
                .bind(role)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to count users", e)
                })?;

        let users = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE ($1::user_role IS NULL OR user_role = $1) \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(role)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list users", e))?;

        Ok(PageResponse::new(users, page, total as u64))
    }

    /// Create a new user.
    ///
    /// A duplicate email (case-insensitive) maps to a conflict error.
    pub async fn create(&self, data: &CreateUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (username, email, hashed_password, user_role) \
             VALUES ($1, $2, $3, $4) \
             RETURNING *",
        )
        .bind(&data.username)
        .bind(&data.email)
        .bind(&data.hashed_password)
        .bind(data.user_role)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some(EMAIL_UNIQUE_INDEX) =>
            {
                AppError::conflict("Email already existed")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create user", e),
        })
    }

    /// Apply a partial update to a user's own account.
    pub async fn update(&self, user_id: Uuid, data: &UpdateUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET username = COALESCE($2, username), \
                              hashed_password = COALESCE($3, hashed_password), \
                              updated_at = NOW() \
             WHERE user_id = $1 RETURNING *",
        )
        .bind(user_id)
        .bind(&data.username)
        .bind(&data.hashed_password)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update user", e))?
        .ok_or_else(|| AppError::not_found(format!("User {user_id} not found")))
    }

    /// Update a user's role.
    pub async fn update_role(&self, user_id: Uuid, role: UserRole) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET user_role = $2, updated_at = NOW() WHERE user_id = $1 RETURNING *",
        )
        .bind(user_id)
        .bind(role)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update role", e))?
        .ok_or_else(|| AppError::not_found(format!("User {user_id} not found")))
    }
}
