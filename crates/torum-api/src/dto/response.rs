//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use torum_auth::jwt::TokenPair;
use torum_entity::document::ReadingDocument;
use torum_entity::post::Post;
use torum_entity::user::{User, UserRole};
use torum_service::document::DownloadLink;
use torum_service::search::SearchResults;

/// Token type reported to clients.
const BEARER: &str = "bearer";

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Public view of an account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    /// User ID.
    pub user_id: Uuid,
    /// Username.
    pub username: String,
    /// Email.
    pub email: String,
    /// Role.
    pub user_role: UserRole,
    /// Created at.
    pub created_at: DateTime<Utc>,
    /// Updated at.
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            user_id: user.user_id,
            username: user.username,
            email: user.email,
            user_role: user.user_role,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Login response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Access token.
    pub access_token: String,
    /// Refresh token.
    pub refresh_token: String,
    /// Always `bearer`.
    pub token_type: String,
    /// Access token expiration.
    pub access_expires_at: DateTime<Utc>,
    /// Refresh token expiration.
    pub refresh_expires_at: DateTime<Utc>,
}

impl From<TokenPair> for TokenResponse {
    fn from(pair: TokenPair) -> Self {
        Self {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            token_type: BEARER.to_string(),
            access_expires_at: pair.access_expires_at,
            refresh_expires_at: pair.refresh_expires_at,
        }
    }
}

/// Refresh response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessTokenResponse {
    /// New access token.
    pub access_token: String,
    /// Always `bearer`.
    pub token_type: String,
    /// Access token expiration.
    pub access_expires_at: DateTime<Utc>,
}

impl AccessTokenResponse {
    /// Wraps a freshly issued access token.
    pub fn bearer(access_token: String, access_expires_at: DateTime<Utc>) -> Self {
        Self {
            access_token,
            token_type: BEARER.to_string(),
            access_expires_at,
        }
    }
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

impl MessageResponse {
    /// Creates a message response.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Presigned download link.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadResponse {
    /// Time-limited GET URL.
    pub download_url: String,
    /// Lifetime of the URL in seconds.
    pub expires_in: u64,
}

impl From<DownloadLink> for DownloadResponse {
    fn from(link: DownloadLink) -> Self {
        Self {
            download_url: link.download_url,
            expires_in: link.expires_in,
        }
    }
}

/// Search results for both content types.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Matching posts, best first.
    pub post_result: Vec<Post>,
    /// Matching documents, best first.
    pub document_result: Vec<ReadingDocument>,
    /// Total matching posts.
    pub post_total: u64,
    /// Total matching documents.
    pub document_total: u64,
    /// Current page.
    pub page: u64,
    /// Items per page.
    pub per_page: u64,
}

impl From<SearchResults> for SearchResponse {
    fn from(results: SearchResults) -> Self {
        Self {
            page: results.posts.page,
            per_page: results.posts.page_size,
            post_total: results.posts.total_items,
            document_total: results.documents.total_items,
            post_result: results.posts.items,
            document_result: results.documents.items,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `ok` or `degraded`.
    pub status: String,
    /// Server version.
    pub version: String,
    /// Database status.
    pub database: String,
    /// Cache status.
    pub cache: String,
    /// Object storage status.
    pub storage: String,
}
