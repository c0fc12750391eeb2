//! User self-service operations: profile viewing and updates.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use torum_auth::password::{PasswordHasher, PasswordValidator};
use torum_auth::rbac::{Permission, RbacEnforcer};
use torum_core::error::AppError;
use torum_database::repositories::UserRepository;
use torum_entity::user::{UpdateUser, User};

use crate::auth::service::normalize_username;
use crate::context::RequestContext;

/// Handles user self-service operations.
#[derive(Debug, Clone)]
pub struct UserService {
    user_repo: Arc<UserRepository>,
    hasher: Arc<PasswordHasher>,
    validator: Arc<PasswordValidator>,
    rbac: Arc<RbacEnforcer>,
}

/// Data for updating a user's own account.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct UpdateProfileRequest {
    /// New username (optional).
    pub username: Option<String>,
    /// Current password, required when changing the password.
    pub password: Option<String>,
    /// New password (optional).
    pub new_password: Option<String>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(
        user_repo: Arc<UserRepository>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
        rbac: Arc<RbacEnforcer>,
    ) -> Self {
        Self {
            user_repo,
            hasher,
            validator,
            rbac,
        }
    }

    /// Gets the current user's profile.
    pub async fn get_profile(&self, ctx: &RequestContext) -> Result<User, AppError> {
        self.user_repo
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Gets another user's profile. Members may only view themselves.
    pub async fn get_user(&self, ctx: &RequestContext, user_id: Uuid) -> Result<User, AppError> {
        if user_id != ctx.user_id {
            self.rbac
                .require_permission(&ctx.role, &Permission::ModerateContent)?;
        }

        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Updates the current user's username and/or password.
    pub async fn update_profile(
        &self,
        ctx: &RequestContext,
        req: UpdateProfileRequest,
    ) -> Result<User, AppError> {
        let user = self.get_profile(ctx).await?;
        let mut changes = UpdateUser::default();

        if let Some(username) = req.username.as_deref() {
            changes.username = Some(normalize_username(username)?);
        }

        if let Some(new_password) = req.new_password.as_deref() {
            let current = req.password.as_deref().ok_or_else(|| {
                AppError::validation("Current password is required to set a new password")
            })?;

            if !self.hasher.verify_password(current, &user.hashed_password)? {
                return Err(AppError::validation("Current password is incorrect"));
            }

            self.validator.validate_not_same(current, new_password)?;
            let username = changes.username.as_deref().unwrap_or(&user.username);
            self.validator
                .validate(new_password, &[username, user.email.as_str()])?;

            changes.hashed_password = Some(self.hasher.hash_password(new_password)?);
        }

        if changes.is_empty() {
            return Ok(user);
        }

        let password_changed = changes.hashed_password.is_some();
        let updated = self.user_repo.update(ctx.user_id, &changes).await?;

        info!(
            user_id = %ctx.user_id,
            ip = %ctx.ip_address,
            password_changed,
            "Profile updated"
        );
        Ok(updated)
    }
}
