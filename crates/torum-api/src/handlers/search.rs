//! Full-text search handler.

use axum::Json;
use axum::extract::State;

use crate::dto::request::SearchParams;
use crate::dto::response::{ApiResponse, SearchResponse};
use crate::error::ApiError;
use crate::extractors::{ApiQuery, PaginationParams};
use crate::state::AppState;

/// GET /api/search?q=...&page=...&per_page=...
pub async fn search(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<SearchParams>,
    ApiQuery(pagination): ApiQuery<PaginationParams>,
) -> Result<Json<ApiResponse<SearchResponse>>, ApiError> {
    let results = state
        .search_service
        .search(&params.q, pagination.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(results.into())))
}
