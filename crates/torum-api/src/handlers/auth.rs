//! Auth handlers: register, login, refresh, logout, me.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use crate::dto::request::{LoginRequest, LogoutRequest, RefreshRequest, RegisterRequest};
use crate::dto::response::{
    AccessTokenResponse, ApiResponse, MessageResponse, TokenResponse, UserResponse,
};
use crate::error::ApiError;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserResponse>>), ApiError> {
    let user = state.auth_service.register(req.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(user.into()))))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<Json<ApiResponse<TokenResponse>>, ApiError> {
    let result = state.auth_service.login(&req.email, &req.password).await?;
    Ok(Json(ApiResponse::ok(result.tokens.into())))
}

/// POST /api/auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RefreshRequest>,
) -> Result<Json<ApiResponse<AccessTokenResponse>>, ApiError> {
    let (token, expires_at) = state.auth_service.refresh(&req.refresh_token).await?;
    Ok(Json(ApiResponse::ok(AccessTokenResponse::bearer(
        token, expires_at,
    ))))
}

/// POST /api/auth/logout
///
/// The body is optional; without one only the access token is revoked.
pub async fn logout(
    State(state): State<AppState>,
    auth: AuthUser,
    body: Option<ValidatedJson<LogoutRequest>>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let refresh_token = body.and_then(|ValidatedJson(req)| req.refresh_token);
    state
        .auth_service
        .logout(&auth, refresh_token.as_deref())
        .await?;

    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Logout successfully",
    ))))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let user = state.auth_service.current_user(&auth).await?;
    Ok(Json(ApiResponse::ok(user.into())))
}
