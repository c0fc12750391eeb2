//! Role-to-permission mapping definitions.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use torum_entity::user::UserRole;

/// A system-level permission granted through a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    /// List accounts and change their roles.
    ManageUsers,
    /// Remove posts and documents owned by other members, view any profile.
    ModerateContent,
    /// Write posts and upload documents.
    CreateContent,
}

/// Defines the mapping from each role to its set of allowed permissions.
#[derive(Debug, Clone)]
pub struct RbacPolicies {
    policies: HashMap<UserRole, HashSet<Permission>>,
}

impl RbacPolicies {
    /// Creates the default policy set.
    pub fn new() -> Self {
        let mut policies = HashMap::new();

        policies.insert(UserRole::User, HashSet::from([Permission::CreateContent]));
        policies.insert(
            UserRole::Moderator,
            HashSet::from([Permission::CreateContent, Permission::ModerateContent]),
        );
        policies.insert(
            UserRole::Admin,
            HashSet::from([
                Permission::CreateContent,
                Permission::ModerateContent,
                Permission::ManageUsers,
            ]),
        );

        Self { policies }
    }

    /// Checks whether a role carries a permission.
    pub fn has_permission(&self, role: &UserRole, permission: &Permission) -> bool {
        self.policies
            .get(role)
            .is_some_and(|perms| perms.contains(permission))
    }
}

impl Default for RbacPolicies {
    fn default() -> Self {
        Self::new()
    }
}
