//! Role guards applied to whole route groups.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use torum_entity::user::UserRole;

use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// Rejects the request unless the caller is an admin.
pub async fn require_admin(
    State(state): State<AppState>,
    auth: AuthUser,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    state
        .rbac
        .require_minimum_role(&auth.role, &UserRole::Admin)?;
    Ok(next.run(request).await)
}
