//! Admin-only user management: listing accounts and changing roles.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use torum_auth::rbac::{Permission, RbacEnforcer};
use torum_core::error::AppError;
use torum_core::types::pagination::{PageRequest, PageResponse};
use torum_database::repositories::UserRepository;
use torum_entity::user::{User, UserRole};

use crate::context::RequestContext;

/// Handles administrative user operations.
#[derive(Debug, Clone)]
pub struct AdminUserService {
    user_repo: Arc<UserRepository>,
    rbac: Arc<RbacEnforcer>,
}

impl AdminUserService {
    /// Creates a new admin user service.
    pub fn new(user_repo: Arc<UserRepository>, rbac: Arc<RbacEnforcer>) -> Self {
        Self { user_repo, rbac }
    }

    /// Lists all users, optionally filtered by role.
    pub async fn list_users(
        &self,
        ctx: &RequestContext,
        role: Option<UserRole>,
        page: PageRequest,
    ) -> Result<PageResponse<User>, AppError> {
        self.rbac
            .require_permission(&ctx.role, &Permission::ManageUsers)?;
        self.user_repo.find_all(role, &page).await
    }

    /// Changes another user's role.
    pub async fn set_role(
        &self,
        ctx: &RequestContext,
        user_id: Uuid,
        role: UserRole,
    ) -> Result<User, AppError> {
        self.rbac
            .require_permission(&ctx.role, &Permission::ManageUsers)?;

        if user_id == ctx.user_id {
            return Err(AppError::validation("Cannot change your own role"));
        }

        let user = self.user_repo.update_role(user_id, role).await?;

        info!(
            admin_id = %ctx.user_id,
            ip = %ctx.ip_address,
            user_id = %user_id,
            role = %role,
            "User role changed"
        );
        Ok(user)
    }
}
