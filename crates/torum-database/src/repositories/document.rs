//! Reading document repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use torum_core::error::{AppError, ErrorKind};
use torum_core::result::AppResult;
use torum_core::types::pagination::{PageRequest, PageResponse};
use torum_entity::document::{CreateReadingDocument, ReadingDocument};

/// Columns mapped onto [`ReadingDocument`].
pub(crate) const DOCUMENT_COLUMNS: &str = "docs_id, docs_owner, docs_title, docs_description, \
     docs_tags, docs_file_path, content_type, size_bytes, uploaded_at";

/// Repository for reading document metadata.
#[derive(Debug, Clone)]
pub struct DocumentRepository {
    pool: PgPool,
}

impl DocumentRepository {
    /// Create a new document repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a document by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ReadingDocument>> {
        sqlx::query_as::<_, ReadingDocument>(&format!(
            "SELECT {DOCUMENT_COLUMNS} FROM reading_documents WHERE docs_id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find document", e))
    }

    /// List all documents, newest first.
    pub async fn find_all(&self, page: &PageRequest) -> AppResult<PageResponse<ReadingDocument>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM reading_documents")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count documents", e)
            })?;

        let docs = sqlx::query_as::<_, ReadingDocument>(&format!(
            "SELECT {DOCUMENT_COLUMNS} FROM reading_documents \
             ORDER BY uploaded_at DESC LIMIT $1 OFFSET $2"
        ))
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list documents", e))?;

        Ok(PageResponse::new(docs, page, total as u64))
    }

    /// List documents uploaded by one user, newest first.
    pub async fn find_by_owner(
        &self,
        owner: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<ReadingDocument>> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM reading_documents WHERE docs_owner = $1")
                .bind(owner)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to count user documents", e)
                })?;

        let docs = sqlx::query_as::<_, ReadingDocument>(&format!(
            "SELECT {DOCUMENT_COLUMNS} FROM reading_documents WHERE docs_owner = $1 \
             ORDER BY uploaded_at DESC LIMIT $2 OFFSET $3"
        ))
        .bind(owner)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list user documents", e)
        })?;

        Ok(PageResponse::new(docs, page, total as u64))
    }

    /// Insert a document row for an object that has already been stored.
    pub async fn create(&self, data: &CreateReadingDocument) -> AppResult<ReadingDocument> {
        sqlx::query_as::<_, ReadingDocument>(&format!(
            "INSERT INTO reading_documents \
                 (docs_id, docs_owner, docs_title, docs_description, docs_tags, \
                  docs_file_path, content_type, size_bytes) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {DOCUMENT_COLUMNS}"
        ))
        .bind(data.docs_id)
        .bind(data.docs_owner)
        .bind(&data.docs_title)
        .bind(&data.docs_description)
        .bind(&data.docs_tags)
        .bind(&data.docs_file_path)
        .bind(&data.content_type)
        .bind(data.size_bytes)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create document", e))
    }

    /// Delete a document row, returning the deleted row.
    pub async fn delete(&self, docs_id: Uuid) -> AppResult<Option<ReadingDocument>> {
        sqlx::query_as::<_, ReadingDocument>(&format!(
            "DELETE FROM reading_documents WHERE docs_id = $1 RETURNING {DOCUMENT_COLUMNS}"
        ))
        .bind(docs_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete document", e))
    }
}
