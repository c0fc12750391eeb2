//! Admin user management handlers.

use axum::Json;
use axum::extract::{Path, State};

use torum_core::types::pagination::PageResponse;

use crate::dto::request::{ChangeRoleRequest, UserFilterParams};
use crate::dto::response::{ApiResponse, UserResponse};
use crate::error::ApiError;
use crate::extractors::path::parse_uuid;
use crate::extractors::{ApiQuery, AuthUser, PaginationParams, ValidatedJson};
use crate::state::AppState;

/// GET /api/admin/users
pub async fn list_users(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiQuery(pagination): ApiQuery<PaginationParams>,
    ApiQuery(filter): ApiQuery<UserFilterParams>,
) -> Result<Json<ApiResponse<PageResponse<UserResponse>>>, ApiError> {
    let page = state
        .admin_user_service
        .list_users(&auth, filter.role, pagination.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(page.map(UserResponse::from))))
}

/// PUT /api/admin/users/{id}/role
pub async fn change_role(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<ChangeRoleRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let user_id = parse_uuid(&id)?;
    let user = state
        .admin_user_service
        .set_role(&auth, user_id, req.user_role)
        .await?;
    Ok(Json(ApiResponse::ok(user.into())))
}
