//! RBAC enforcement logic: checks whether a role meets a requirement.

use torum_core::error::AppError;
use torum_entity::user::UserRole;

use super::policies::{Permission, RbacPolicies};

/// Enforces role-based access control.
#[derive(Debug, Clone, Default)]
pub struct RbacEnforcer {
    policies: RbacPolicies,
}

impl RbacEnforcer {
    /// Creates a new enforcer with the default policy set.
    pub fn new() -> Self {
        Self {
            policies: RbacPolicies::new(),
        }
    }

    /// Fails with an authorization error unless `role` carries `permission`.
    pub fn require_permission(
        &self,
        role: &UserRole,
        permission: &Permission,
    ) -> Result<(), AppError> {
        if self.policies.has_permission(role, permission) {
            Ok(())
        } else {
            Err(AppError::authorization(format!(
                "Role '{role}' does not have permission '{permission:?}'"
            )))
        }
    }

    /// Checks whether the role has the required permission.
    pub fn has_permission(&self, role: &UserRole, permission: &Permission) -> bool {
        self.policies.has_permission(role, permission)
    }

    /// Checks whether the given role is at least the specified minimum role.
    ///
    /// Role hierarchy: Admin > Moderator > User
    pub fn require_minimum_role(
        &self,
        actual_role: &UserRole,
        minimum_role: &UserRole,
    ) -> Result<(), AppError> {
        if actual_role.has_at_least(minimum_role) {
            Ok(())
        } else {
            Err(AppError::authorization(format!(
                "Role '{actual_role}' is insufficient; minimum required: '{minimum_role}'"
            )))
        }
    }

    /// Owners may always act on their content; others need moderation rights.
    pub fn can_remove_content(&self, role: &UserRole, is_owner: bool) -> bool {
        is_owner || self.has_permission(role, &Permission::ModerateContent)
    }
}
