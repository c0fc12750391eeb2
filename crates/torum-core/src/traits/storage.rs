//! Object storage trait for pluggable document backends.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::AppError;
use crate::result::AppResult;

/// Trait for object storage backends (S3 or local filesystem).
///
/// Keys are slash-separated relative paths such as
/// `documents/{owner}/{id}.pdf`.
#[async_trait]
pub trait ObjectStorage: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "s3", "local").
    fn provider_type(&self) -> &str;

    /// Check whether the provider is healthy and reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Store an object under `key`, replacing any existing object.
    async fn put_object(&self, key: &str, data: Bytes, content_type: &str) -> AppResult<()>;

    /// Produce a time-limited URL that allows anyone holding it to download the object.
    async fn presigned_get_url(&self, key: &str, expires_in: Duration) -> AppResult<String>;

    /// Delete the object stored under `key`. Deleting a missing object is not an error.
    async fn delete_object(&self, key: &str) -> AppResult<()>;

    /// Check whether an object exists under `key`.
    async fn exists(&self, key: &str) -> AppResult<bool>;
}

/// Validate an object key before it reaches a backend.
pub fn validate_key(key: &str) -> AppResult<()> {
    if key.is_empty() {
        return Err(AppError::validation("Object key must not be empty"));
    }
    if key.starts_with('/') || key.contains('\\') {
        return Err(AppError::validation(format!("Invalid object key: {key}")));
    }
    if key.split('/').any(|segment| segment.is_empty() || segment == "..") {
        return Err(AppError::validation(format!("Invalid object key: {key}")));
    }
    Ok(())
}
