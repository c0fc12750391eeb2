//! Post entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A text post owned by a user.
///
/// The `search_vector` column is maintained by a database trigger and is
/// never loaded into this struct.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Post {
    /// Primary key.
    pub post_id: Uuid,
    /// Author's user ID.
    pub post_owner: Uuid,
    pub post_title: String,
    pub post_content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Whether the given user authored this post.
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.post_owner == user_id
    }
}

/// Data required to insert a new post.
#[derive(Debug, Clone)]
pub struct CreatePost {
    pub post_owner: Uuid,
    pub post_title: String,
    pub post_content: String,
}

/// Replacement title and content for an existing post.
#[derive(Debug, Clone)]
pub struct UpdatePost {
    pub post_title: String,
    pub post_content: String,
}
