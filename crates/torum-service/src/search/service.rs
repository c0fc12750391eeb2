//! Search service delegating ranking to PostgreSQL full-text search.

use std::sync::Arc;

use tracing::debug;

use torum_core::error::AppError;
use torum_core::types::pagination::{PageRequest, PageResponse};
use torum_database::repositories::SearchRepository;
use torum_database::repositories::search::build_ts_query;
use torum_entity::document::ReadingDocument;
use torum_entity::post::Post;

/// Ranked matches from both content types, paginated independently.
#[derive(Debug, Clone)]
pub struct SearchResults {
    /// Matching posts, best first.
    pub posts: PageResponse<Post>,
    /// Matching documents, best first.
    pub documents: PageResponse<ReadingDocument>,
}

/// Handles search queries.
#[derive(Debug, Clone)]
pub struct SearchService {
    search_repo: Arc<SearchRepository>,
}

impl SearchService {
    /// Creates a new search service.
    pub fn new(search_repo: Arc<SearchRepository>) -> Self {
        Self { search_repo }
    }

    /// Searches posts and documents for the given free text.
    pub async fn search(&self, query: &str, page: PageRequest) -> Result<SearchResults, AppError> {
        let ts_query = build_ts_query(query)
            .ok_or_else(|| AppError::validation("Search query must contain at least one word"))?;
        if !self.search_repo.is_searchable(&ts_query).await? {
            return Err(AppError::validation(
                "Search query must contain at least one word",
            ));
        }

        let posts = self.search_repo.search_posts(&ts_query, &page).await?;
        let documents = self.search_repo.search_documents(&ts_query, &page).await?;

        debug!(
            ts_query = %ts_query,
            posts = posts.total_items,
            documents = documents.total_items,
            "Search completed"
        );
        Ok(SearchResults { posts, documents })
    }
}
