//! Expiry guard for download links served by the local storage provider.

use axum::extract::{Query, Request};
use axum::middleware::Next;
use axum::response::Response;
use chrono::Utc;
use serde::Deserialize;

use torum_core::error::AppError;

use crate::error::ApiError;

/// Path the local provider's objects are served under.
pub const LOCAL_OBJECTS_PATH: &str = "/objects";

#[derive(Debug, Deserialize)]
struct LinkExpiry {
    expires: i64,
}

/// Rejects links without an `expires` timestamp or past it.
pub async fn require_unexpired_link(request: Request, next: Next) -> Result<Response, ApiError> {
    let Query(link) = Query::<LinkExpiry>::try_from_uri(request.uri())
        .map_err(|_| AppError::validation("Download link is missing its expiry"))?;

    if link.expires < Utc::now().timestamp() {
        return Err(AppError::authorization("Download link has expired").into());
    }

    Ok(next.run(request).await)
}
