//! Reading document entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Default tag applied when an upload carries none.
pub const DEFAULT_TAGS: &str = "Documents";

/// A PDF or DOCX file uploaded to object storage, with searchable metadata.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ReadingDocument {
    /// Primary key.
    pub docs_id: Uuid,
    /// Uploader's user ID.
    pub docs_owner: Uuid,
    pub docs_title: String,
    pub docs_description: Option<String>,
    pub docs_tags: String,
    /// Object storage key of the file.
    pub docs_file_path: String,
    /// MIME type the object was stored with.
    pub content_type: String,
    /// Size of the stored object in bytes.
    pub size_bytes: i64,
    pub uploaded_at: DateTime<Utc>,
}

impl ReadingDocument {
    /// Whether the given user uploaded this document.
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.docs_owner == user_id
    }

    /// The file name of the stored object (last key segment).
    pub fn file_name(&self) -> &str {
        self.docs_file_path
            .rsplit('/')
            .next()
            .unwrap_or(&self.docs_file_path)
    }
}

/// Data required to insert a new document row.
#[derive(Debug, Clone)]
pub struct CreateReadingDocument {
    pub docs_id: Uuid,
    pub docs_owner: Uuid,
    pub docs_title: String,
    pub docs_description: Option<String>,
    pub docs_tags: String,
    pub docs_file_path: String,
    pub content_type: String,
    pub size_bytes: i64,
}
