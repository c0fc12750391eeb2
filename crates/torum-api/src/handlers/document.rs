//! Reading document handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use bytes::Bytes;
use tracing::debug;

use torum_core::error::AppError;
use torum_core::types::pagination::PageResponse;
use torum_entity::document::ReadingDocument;
use torum_service::document::UploadDocumentParams;

use crate::dto::response::{ApiResponse, DownloadResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::multipart::multipart_error;
use crate::extractors::path::parse_uuid;
use crate::extractors::{ApiMultipart, ApiQuery, AuthUser, PaginationParams};
use crate::state::AppState;

/// POST /api/documents (multipart/form-data)
///
/// Fields: `docs_title`, `docs_description`, `docs_tags`, `file`.
pub async fn upload_document(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiMultipart(mut multipart): ApiMultipart,
) -> Result<(StatusCode, Json<ApiResponse<ReadingDocument>>), ApiError> {
    let mut docs_title = None;
    let mut docs_description = None;
    let mut docs_tags = None;
    let mut file: Option<(String, Bytes)> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "docs_title" => docs_title = Some(field.text().await.map_err(multipart_error)?),
            "docs_description" => {
                docs_description = Some(field.text().await.map_err(multipart_error)?)
            }
            "docs_tags" => docs_tags = Some(field.text().await.map_err(multipart_error)?),
            "file" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let data = field.bytes().await.map_err(multipart_error)?;
                file = Some((file_name, data));
            }
            other => debug!(field = %other, "Ignoring unknown multipart field"),
        }
    }

    let docs_title =
        docs_title.ok_or_else(|| AppError::validation("Missing 'docs_title' field"))?;
    let (file_name, data) = file.ok_or_else(|| AppError::validation("Missing 'file' field"))?;

    let document = state
        .document_service
        .upload(
            &auth,
            UploadDocumentParams {
                docs_title,
                docs_description,
                docs_tags,
                file_name,
                data,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(document))))
}

/// GET /api/documents
pub async fn list_documents(
    State(state): State<AppState>,
    _auth: AuthUser,
    ApiQuery(pagination): ApiQuery<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<ReadingDocument>>>, ApiError> {
    let page = state
        .document_service
        .list_documents(pagination.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// GET /api/documents/mine
pub async fn list_my_documents(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiQuery(pagination): ApiQuery<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<ReadingDocument>>>, ApiError> {
    let page = state
        .document_service
        .list_my_documents(&auth, pagination.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// GET /api/documents/{id}
pub async fn get_document(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ReadingDocument>>, ApiError> {
    let docs_id = parse_uuid(&id)?;
    let document = state.document_service.get_document(docs_id).await?;
    Ok(Json(ApiResponse::ok(document)))
}

/// GET /api/documents/{id}/download
pub async fn download_document(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<DownloadResponse>>, ApiError> {
    let docs_id = parse_uuid(&id)?;
    let link = state.document_service.download_link(&auth, docs_id).await?;
    Ok(Json(ApiResponse::ok(link.into())))
}

/// DELETE /api/documents/{id}
pub async fn delete_document(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let docs_id = parse_uuid(&id)?;
    state.document_service.delete_document(&auth, docs_id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Document deleted successfully",
    ))))
}
