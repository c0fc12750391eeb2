//! Reading document service: object storage plus metadata rows.

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use tracing::{error, info, warn};
use uuid::Uuid;

use torum_auth::rbac::{Permission, RbacEnforcer};
use torum_core::config::StorageConfig;
use torum_core::error::AppError;
use torum_core::traits::storage::ObjectStorage;
use torum_core::types::pagination::{PageRequest, PageResponse};
use torum_database::repositories::DocumentRepository;
use torum_entity::document::{CreateReadingDocument, DocumentKind, ReadingDocument, DEFAULT_TAGS};
use torum_storage::StorageManager;

use crate::context::RequestContext;

const MAX_TITLE_LENGTH: usize = 100;
const MAX_DESCRIPTION_LENGTH: usize = 500;
const MAX_TAGS_LENGTH: usize = 100;

/// A multipart document upload, already read into memory.
#[derive(Debug, Clone)]
pub struct UploadDocumentParams {
    /// Document title (required).
    pub docs_title: String,
    /// Free-text description.
    pub docs_description: Option<String>,
    /// Comma-separated tags; blank means [`DEFAULT_TAGS`].
    pub docs_tags: Option<String>,
    /// Client-side file name, used for the extension only.
    pub file_name: String,
    /// File content.
    pub data: Bytes,
}

/// Validated, normalised upload fields.
#[derive(Debug)]
struct ValidatedUpload {
    title: String,
    description: Option<String>,
    tags: String,
    kind: DocumentKind,
}

impl UploadDocumentParams {
    fn validate(&self, max_size: u64) -> Result<ValidatedUpload, AppError> {
        let title = self.docs_title.trim();
        if title.is_empty() {
            return Err(AppError::validation("Document title is required"));
        }
        check_length("Document title", title, MAX_TITLE_LENGTH)?;

        let description = self
            .docs_description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty());
        if let Some(description) = description {
            check_length("Description", description, MAX_DESCRIPTION_LENGTH)?;
        }

        let tags = self
            .docs_tags
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_TAGS);
        check_length("Tags", tags, MAX_TAGS_LENGTH)?;

        let kind = DocumentKind::from_file_name(&self.file_name)?;

        if self.data.is_empty() {
            return Err(AppError::validation("Uploaded file is empty"));
        }
        if self.data.len() as u64 > max_size {
            return Err(AppError::payload_too_large(format!(
                "File exceeds maximum upload size of {max_size} bytes"
            )));
        }
        if !kind.matches_content(&self.data) {
            return Err(AppError::validation(format!(
                "File content is not a valid .{kind} document"
            )));
        }

        Ok(ValidatedUpload {
            title: title.to_string(),
            description: description.map(str::to_string),
            tags: tags.to_string(),
            kind,
        })
    }
}

fn check_length(field: &str, value: &str, max: usize) -> Result<(), AppError> {
    if value.chars().count() > max {
        return Err(AppError::validation(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}

/// A time-limited download URL.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct DownloadLink {
    /// Presigned GET URL.
    pub download_url: String,
    /// Lifetime of the URL in seconds.
    pub expires_in: u64,
}

/// Handles reading document operations.
#[derive(Debug, Clone)]
pub struct DocumentService {
    doc_repo: Arc<DocumentRepository>,
    storage: Arc<StorageManager>,
    rbac: Arc<RbacEnforcer>,
    config: StorageConfig,
}

impl DocumentService {
    /// Creates a new document service.
    pub fn new(
        doc_repo: Arc<DocumentRepository>,
        storage: Arc<StorageManager>,
        rbac: Arc<RbacEnforcer>,
        config: StorageConfig,
    ) -> Self {
        Self {
            doc_repo,
            storage,
            rbac,
            config,
        }
    }

    /// Stores the file, then records its metadata.
    ///
    /// The stored object is removed again when the row cannot be written.
    pub async fn upload(
        &self,
        ctx: &RequestContext,
        params: UploadDocumentParams,
    ) -> Result<ReadingDocument, AppError> {
        self.rbac
            .require_permission(&ctx.role, &Permission::CreateContent)?;
        let upload = params.validate(self.config.max_upload_size_bytes)?;

        let docs_id = Uuid::new_v4();
        let key = object_key(ctx.user_id, docs_id, upload.kind);
        let size_bytes = params.data.len() as i64;

        self.storage
            .put_object(&key, params.data, upload.kind.content_type())
            .await
            .map_err(|e| {
                error!(user_id = %ctx.user_id, key = %key, error = %e, "Document upload failed");
                AppError::internal("Upload file to object storage failed")
            })?;

        let record = CreateReadingDocument {
            docs_id,
            docs_owner: ctx.user_id,
            docs_title: upload.title,
            docs_description: upload.description,
            docs_tags: upload.tags,
            docs_file_path: key.clone(),
            content_type: upload.kind.content_type().to_string(),
            size_bytes,
        };

        let document = match self.doc_repo.create(&record).await {
            Ok(document) => document,
            Err(e) => {
                if let Err(cleanup) = self.storage.delete_object(&key).await {
                    warn!(key = %key, error = %cleanup, "Failed to remove orphaned object");
                }
                return Err(e);
            }
        };

        info!(
            user_id = %ctx.user_id,
            ip = %ctx.ip_address,
            docs_id = %document.docs_id,
            size = document.size_bytes,
            "Document uploaded"
        );
        Ok(document)
    }

    /// Lists every document, newest first.
    pub async fn list_documents(
        &self,
        page: PageRequest,
    ) -> Result<PageResponse<ReadingDocument>, AppError> {
        self.doc_repo.find_all(&page).await
    }

    /// Lists the caller's documents.
    pub async fn list_my_documents(
        &self,
        ctx: &RequestContext,
        page: PageRequest,
    ) -> Result<PageResponse<ReadingDocument>, AppError> {
        self.doc_repo.find_by_owner(ctx.user_id, &page).await
    }

    /// Fetches document metadata.
    pub async fn get_document(&self, docs_id: Uuid) -> Result<ReadingDocument, AppError> {
        self.doc_repo
            .find_by_id(docs_id)
            .await?
            .ok_or_else(|| AppError::not_found("Document not found"))
    }

    /// Issues a presigned download URL for a document.
    pub async fn download_link(
        &self,
        ctx: &RequestContext,
        docs_id: Uuid,
    ) -> Result<DownloadLink, AppError> {
        let document = self.get_document(docs_id).await?;
        let expires_in = self.config.presign_expiry_seconds;

        let download_url = self
            .storage
            .presigned_get_url(&document.docs_file_path, Duration::from_secs(expires_in))
            .await
            .map_err(|e| {
                error!(docs_id = %docs_id, error = %e, "Presigning failed");
                AppError::internal("Generate presigned URL failed")
            })?;

        info!(user_id = %ctx.user_id, docs_id = %docs_id, "Download link issued");
        Ok(DownloadLink {
            download_url,
            expires_in,
        })
    }

    /// Deletes a document row and its stored object.
    ///
    /// Object removal failures are logged and do not fail the request.
    pub async fn delete_document(
        &self,
        ctx: &RequestContext,
        docs_id: Uuid,
    ) -> Result<(), AppError> {
        let document = self.get_document(docs_id).await?;

        if !self
            .rbac
            .can_remove_content(&ctx.role, document.is_owned_by(ctx.user_id))
        {
            return Err(AppError::not_found("Document not found"));
        }

        let deleted = self
            .doc_repo
            .delete(docs_id)
            .await?
            .ok_or_else(|| AppError::not_found("Document not found"))?;

        if let Err(e) = self.storage.delete_object(&deleted.docs_file_path).await {
            warn!(
                docs_id = %docs_id,
                key = %deleted.docs_file_path,
                error = %e,
                "Document row deleted but object removal failed"
            );
        }

        info!(
            user_id = %ctx.user_id,
            ip = %ctx.ip_address,
            docs_id = %docs_id,
            "Document deleted"
        );
        Ok(())
    }
}

/// Storage key for a document: `documents/{owner}/{id}.{ext}`.
fn object_key(owner: Uuid, docs_id: Uuid, kind: DocumentKind) -> String {
    format!("documents/{owner}/{docs_id}.{}", kind.extension())
}
