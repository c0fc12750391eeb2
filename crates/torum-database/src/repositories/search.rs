//! Ranked full-text search over posts and reading documents.
//!
//! Both tables carry a trigger-maintained `search_vector` column backed by a
//! GIN index; ranking is delegated to `ts_rank`.

use sqlx::PgPool;

use torum_core::error::{AppError, ErrorKind};
use torum_core::result::AppResult;
use torum_core::types::pagination::{PageRequest, PageResponse};
use torum_entity::document::ReadingDocument;
use torum_entity::post::Post;

use super::document::DOCUMENT_COLUMNS;
use super::post::POST_COLUMNS;

/// Upper bound on the number of terms taken from a query.
const MAX_TERMS: usize = 16;

/// Build a prefix-matching `to_tsquery` expression from free text.
///
/// Characters that are not letters or digits split terms, so tsquery
/// operators in user input never reach the parser. Every term must match
/// (`&`) and matches as a prefix (`:*`). Returns `None` when nothing
/// searchable remains.
pub fn build_ts_query(raw: &str) -> Option<String> {
    let terms: Vec<String> = raw
        .split(|c: char| !c.is_alphanumeric())
        .filter(|term| !term.is_empty())
        .take(MAX_TERMS)
        .map(|term| format!("{}:*", term.to_lowercase()))
        .collect();

    if terms.is_empty() {
        None
    } else {
        Some(terms.join(" & "))
    }
}

/// Repository executing full-text queries.
#[derive(Debug, Clone)]
pub struct SearchRepository {
    pool: PgPool,
}

impl SearchRepository {
    /// Create a new search repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Whether the query keeps any lexeme once the English dictionary has
    /// dropped its stop words.
    pub async fn is_searchable(&self, ts_query: &str) -> AppResult<bool> {
        sqlx::query_scalar("SELECT numnode(to_tsquery('english', $1)) > 0")
            .bind(ts_query)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to parse search query", e)
            })
    }

    /// Search posts by title and content, best match first.
    pub async fn search_posts(
        &self,
        ts_query: &str,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Post>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM posts WHERE search_vector @@ to_tsquery('english', $1)",
        )
        .bind(ts_query)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count post search results", e)
        })?;

        let posts = sqlx::query_as::<_, Post>(&format!(
            "SELECT {POST_COLUMNS} FROM posts, to_tsquery('english', $1) AS query \
             WHERE search_vector @@ query \
             ORDER BY ts_rank(search_vector, query) DESC, created_at DESC \
             LIMIT $2 OFFSET $3"
        ))
        .bind(ts_query)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to search posts", e))?;

        Ok(PageResponse::new(posts, page, total as u64))
    }

    /// Search documents by title, description and tags, best match first.
    pub async fn search_documents(
        &self,
        ts_query: &str,
        page: &PageRequest,
    ) -> AppResult<PageResponse<ReadingDocument>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM reading_documents \
             WHERE search_vector @@ to_tsquery('english', $1)",
        )
        .bind(ts_query)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                "Failed to count document search results",
                e,
            )
        })?;

        let docs = sqlx::query_as::<_, ReadingDocument>(&format!(
            "SELECT {DOCUMENT_COLUMNS} FROM reading_documents, to_tsquery('english', $1) AS query \
             WHERE search_vector @@ query \
             ORDER BY ts_rank(search_vector, query) DESC, uploaded_at DESC \
             LIMIT $2 OFFSET $3"
        ))
        .bind(ts_query)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to search documents", e)
        })?;

        Ok(PageResponse::new(docs, page, total as u64))
    }
}
