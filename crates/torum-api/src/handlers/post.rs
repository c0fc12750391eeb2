//! Forum post handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use torum_core::types::pagination::PageResponse;
use torum_entity::post::Post;

use crate::dto::request::PostRequest;
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::path::parse_uuid;
use crate::extractors::{ApiQuery, AuthUser, PaginationParams, ValidatedJson};
use crate::state::AppState;

/// POST /api/posts
pub async fn create_post(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<PostRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Post>>), ApiError> {
    let post = state.post_service.create_post(&auth, req.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(post))))
}

/// GET /api/posts
pub async fn list_posts(
    State(state): State<AppState>,
    ApiQuery(pagination): ApiQuery<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<Post>>>, ApiError> {
    let page = state
        .post_service
        .list_posts(pagination.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// GET /api/posts/mine
pub async fn list_my_posts(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiQuery(pagination): ApiQuery<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<Post>>>, ApiError> {
    let page = state
        .post_service
        .list_my_posts(&auth, pagination.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// GET /api/posts/{id}
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Post>>, ApiError> {
    let post_id = parse_uuid(&id)?;
    let post = state.post_service.get_post(post_id).await?;
    Ok(Json(ApiResponse::ok(post)))
}

/// PUT /api/posts/{id}
pub async fn update_post(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<PostRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let post_id = parse_uuid(&id)?;
    state
        .post_service
        .update_post(&auth, post_id, req.into())
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Post updated successfully",
    ))))
}

/// DELETE /api/posts/{id}
pub async fn delete_post(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let post_id = parse_uuid(&id)?;
    state.post_service.delete_post(&auth, post_id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Post deleted successfully",
    ))))
}
