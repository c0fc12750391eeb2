//! Local filesystem storage provider.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use tokio::fs;
use tracing::debug;

use torum_core::error::{AppError, ErrorKind};
use torum_core::result::AppResult;
use torum_core::traits::storage::{ObjectStorage, validate_key};

/// Local filesystem object storage.
///
/// Objects live under `root` at their key path. Download URLs point at
/// `public_base_url` and carry the expiry as a query parameter. The API
/// server serves them under `/objects` and refuses expired links, so
/// `public_base_url` must end in that path.
#[derive(Debug, Clone)]
pub struct LocalObjectStorage {
    /// Root directory for all stored objects.
    root: PathBuf,
    /// Base URL download links are built from.
    public_base_url: String,
}

impl LocalObjectStorage {
    /// Create a new local provider rooted at the given path.
    pub async fn new(root_path: &str, public_base_url: &str) -> AppResult<Self> {
        let root = PathBuf::from(root_path);
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create storage root: {}", root.display()),
                e,
            )
        })?;
        Ok(Self {
            root,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Resolve a validated key to a path within the root.
    fn resolve(&self, key: &str) -> AppResult<PathBuf> {
        validate_key(key)?;
        Ok(self.root.join(key))
    }

    /// Ensure the parent directory of a path exists.
    async fn ensure_parent(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to create parent directory: {}", parent.display()),
                    e,
                )
            })?;
        }
        Ok(())
    }
}

#[async_trait]
impl ObjectStorage for LocalObjectStorage {
    fn provider_type(&self) -> &str {
        "local"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(fs::metadata(&self.root)
            .await
            .map(|meta| meta.is_dir())
            .unwrap_or(false))
    }

    async fn put_object(&self, key: &str, data: Bytes, content_type: &str) -> AppResult<()> {
        let full_path = self.resolve(key)?;
        self.ensure_parent(&full_path).await?;

        fs::write(&full_path, &data).await.map_err(|e| {
            AppError::with_source(ErrorKind::Storage, format!("Failed to write object: {key}"), e)
        })?;

        debug!(key, content_type, bytes = data.len(), "Stored object");
        Ok(())
    }

    async fn presigned_get_url(&self, key: &str, expires_in: Duration) -> AppResult<String> {
        let full_path = self.resolve(key)?;
        if !fs::try_exists(&full_path).await.unwrap_or(false) {
            return Err(AppError::not_found(format!("Object not found: {key}")));
        }

        let expires_at = Utc::now().timestamp() + expires_in.as_secs() as i64;
        Ok(format!(
            "{}/{key}?expires={expires_at}",
            self.public_base_url
        ))
    }

    async fn delete_object(&self, key: &str) -> AppResult<()> {
        let full_path = self.resolve(key)?;
        match fs::remove_file(&full_path).await {
            Ok(()) => {
                debug!(key, "Deleted object");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to delete object: {key}"),
                e,
            )),
        }
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        let full_path = self.resolve(key)?;
        fs::try_exists(&full_path).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to check object: {key}"),
                e,
            )
        })
    }
}
