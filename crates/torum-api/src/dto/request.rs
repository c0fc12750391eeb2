//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use torum_entity::user::UserRole;
use torum_service::auth::RegisterRequest as RegisterCommand;
use torum_service::post::PostInput;
use torum_service::user::UpdateProfileRequest as UpdateProfileCommand;

/// Registration request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Display name.
    #[validate(length(min = 1, max = 50, message = "Username must be 1-50 characters"))]
    pub username: String,
    /// Login email.
    #[validate(email(message = "Email is invalid"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, max = 128, message = "Password must be 1-128 characters"))]
    pub password: String,
}

impl From<RegisterRequest> for RegisterCommand {
    fn from(req: RegisterRequest) -> Self {
        Self {
            username: req.username,
            email: req.email,
            password: req.password,
        }
    }
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email.
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, max = 128, message = "Password must be 1-128 characters"))]
    pub password: String,
}

/// Token refresh request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RefreshRequest {
    /// Refresh token.
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,
}

/// Logout request body. The whole body is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct LogoutRequest {
    /// Refresh token to revoke alongside the access token.
    pub refresh_token: Option<String>,
}

/// Own-profile update request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    /// New username.
    #[validate(length(min = 1, max = 50, message = "Username must be 1-50 characters"))]
    pub username: Option<String>,
    /// Current password.
    #[validate(length(max = 128, message = "Password must be at most 128 characters"))]
    pub password: Option<String>,
    /// New password.
    #[validate(length(max = 128, message = "Password must be at most 128 characters"))]
    pub new_password: Option<String>,
}

impl From<UpdateProfileRequest> for UpdateProfileCommand {
    fn from(req: UpdateProfileRequest) -> Self {
        Self {
            username: req.username,
            password: req.password,
            new_password: req.new_password,
        }
    }
}

/// Role change request (admin).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChangeRoleRequest {
    /// Role to assign.
    pub user_role: UserRole,
}

/// Optional role filter for the admin user listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserFilterParams {
    /// Only list users with this role.
    pub role: Option<UserRole>,
}

/// Post create/update body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PostRequest {
    /// Title.
    #[validate(length(min = 1, max = 200, message = "Post title must be 1-200 characters"))]
    pub post_title: String,
    /// Body text.
    #[serde(default)]
    pub post_content: String,
}

impl From<PostRequest> for PostInput {
    fn from(req: PostRequest) -> Self {
        Self {
            post_title: req.post_title,
            post_content: req.post_content,
        }
    }
}

/// Search query parameters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchParams {
    /// Free-text query.
    #[serde(default)]
    pub q: String,
}
