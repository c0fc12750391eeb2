//! Post repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use torum_core::error::{AppError, ErrorKind};
use torum_core::result::AppResult;
use torum_core::types::pagination::{PageRequest, PageResponse};
use torum_entity::post::{CreatePost, Post, UpdatePost};

/// Columns mapped onto [`Post`]; `search_vector` stays in the database.
pub(crate) const POST_COLUMNS: &str =
    "post_id, post_owner, post_title, post_content, created_at, updated_at";

/// Repository for post CRUD operations.
#[derive(Debug, Clone)]
pub struct PostRepository {
    pool: PgPool,
}

impl PostRepository {
    /// Create a new post repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a post by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Post>> {
        sqlx::query_as::<_, Post>(&format!("SELECT {POST_COLUMNS} FROM posts WHERE post_id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find post", e))
    }

    /// List all posts, newest first.
    pub async fn find_all(&self, page: &PageRequest) -> AppResult<PageResponse<Post>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count posts", e))?;

        let posts = sqlx::query_as::<_, Post>(&format!(
            "SELECT {POST_COLUMNS} FROM posts ORDER BY created_at DESC LIMIT $1 OFFSET $2"
        ))
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list posts", e))?;

        Ok(PageResponse::new(posts, page, total as u64))
    }

    /// List posts written by one user, newest first.
    pub async fn find_by_owner(
        &self,
        owner: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Post>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts WHERE post_owner = $1")
            .bind(owner)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count user posts", e)
            })?;

        let posts = sqlx::query_as::<_, Post>(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE post_owner = $1 \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3"
        ))
        .bind(owner)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list user posts", e))?;

        Ok(PageResponse::new(posts, page, total as u64))
    }

    /// Insert a new post.
    pub async fn create(&self, data: &CreatePost) -> AppResult<Post> {
        sqlx::query_as::<_, Post>(&format!(
            "INSERT INTO posts (post_owner, post_title, post_content) \
             VALUES ($1, $2, $3) RETURNING {POST_COLUMNS}"
        ))
        .bind(data.post_owner)
        .bind(&data.post_title)
        .bind(&data.post_content)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create post", e))
    }

    /// Replace a post's title and content, scoped to its owner.
    ///
    /// Returns `None` when no post with that ID belongs to `owner`.
    pub async fn update_owned(
        &self,
        post_id: Uuid,
        owner: Uuid,
        data: &UpdatePost,
    ) -> AppResult<Option<Post>> {
        sqlx::query_as::<_, Post>(&format!(
            "UPDATE posts SET post_title = $3, post_content = $4, updated_at = NOW() \
             WHERE post_id = $1 AND post_owner = $2 RETURNING {POST_COLUMNS}"
        ))
        .bind(post_id)
        .bind(owner)
        .bind(&data.post_title)
        .bind(&data.post_content)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update post", e))
    }

    /// Delete a post by ID.
    pub async fn delete(&self, post_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM posts WHERE post_id = $1")
            .bind(post_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete post", e))?;

        Ok(result.rows_affected() > 0)
    }
}
