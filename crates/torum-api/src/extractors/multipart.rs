//! Multipart extractor with envelope-shaped rejections.

use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::{FromRequest, Multipart, Request};
use axum::http::StatusCode;

use torum_core::error::AppError;

use crate::error::ApiError;

/// A `multipart/form-data` body.
#[derive(Debug)]
pub struct ApiMultipart(pub Multipart);

impl<S> FromRequest<S> for ApiMultipart
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        Multipart::from_request(req, state)
            .await
            .map(Self)
            .map_err(multipart_rejection)
    }
}

fn multipart_rejection(rejection: MultipartRejection) -> ApiError {
    AppError::validation(format!("Invalid multipart body: {}", rejection.body_text())).into()
}

/// Maps an error raised while reading fields.
pub fn multipart_error(err: MultipartError) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::payload_too_large("Uploaded file exceeds the size limit").into()
    } else {
        AppError::validation(format!("Invalid multipart body: {}", err.body_text())).into()
    }
}
