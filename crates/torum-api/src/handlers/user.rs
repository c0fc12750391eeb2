//! User profile handlers.

use axum::Json;
use axum::extract::{Path, State};

use crate::dto::request::UpdateProfileRequest;
use crate::dto::response::{ApiResponse, UserResponse};
use crate::error::ApiError;
use crate::extractors::path::parse_uuid;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// GET /api/users/me
pub async fn get_me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let user = state.user_service.get_profile(&auth).await?;
    Ok(Json(ApiResponse::ok(user.into())))
}

/// PUT /api/users/me
pub async fn update_me(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<UpdateProfileRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let user = state.user_service.update_profile(&auth, req.into()).await?;
    Ok(Json(ApiResponse::ok(user.into())))
}

/// GET /api/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let user_id = parse_uuid(&id)?;
    let user = state.user_service.get_user(&auth, user_id).await?;
    Ok(Json(ApiResponse::ok(user.into())))
}
