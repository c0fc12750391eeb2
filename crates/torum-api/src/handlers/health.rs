//! Health check handler.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::warn;

use torum_core::error::AppError;
use torum_core::traits::cache::CacheProvider;
use torum_core::traits::storage::ObjectStorage;
use torum_database::connection::check_health;

use crate::dto::response::{ApiResponse, HealthResponse};
use crate::state::AppState;

/// GET /api/health
///
/// Returns 200 when every dependency answers, 503 with status
/// `degraded` otherwise.
pub async fn health(
    State(state): State<AppState>,
) -> (StatusCode, Json<ApiResponse<HealthResponse>>) {
    let database = describe("database", check_health(&state.db_pool).await);
    let cache = describe("cache", state.cache.health_check().await);
    let storage = describe("storage", state.storage.health_check().await);

    let healthy = [database, cache, storage].iter().all(|up| *up);
    let (status_code, status) = if healthy {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    (
        status_code,
        Json(ApiResponse::ok(HealthResponse {
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            database: label(database),
            cache: label(cache),
            storage: label(storage),
        })),
    )
}

fn describe(component: &str, result: Result<bool, AppError>) -> bool {
    match result {
        Ok(up) => up,
        Err(e) => {
            warn!(component, error = %e, "Health check failed");
            false
        }
    }
}

fn label(up: bool) -> String {
    let label = if up { "up" } else { "down" };
    label.to_string()
}
