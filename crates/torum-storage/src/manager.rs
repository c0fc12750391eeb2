//! Storage manager: selects the configured provider and delegates to it.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use tracing::info;

use torum_core::config::StorageConfig;
use torum_core::error::AppError;
use torum_core::result::AppResult;
use torum_core::traits::storage::ObjectStorage;

use crate::providers::LocalObjectStorage;

/// Handle to the active object storage provider.
#[derive(Debug, Clone)]
pub struct StorageManager {
    inner: Arc<dyn ObjectStorage>,
}

impl StorageManager {
    /// Build the provider named by `config.provider`.
    pub async fn new(config: &StorageConfig) -> AppResult<Self> {
        let inner: Arc<dyn ObjectStorage> = match config.provider.as_str() {
            "local" => Arc::new(
                LocalObjectStorage::new(&config.local.root_path, &config.local.public_base_url)
                    .await?,
            ),
            #[cfg(feature = "s3")]
            "s3" => Arc::new(crate::providers::S3ObjectStorage::new(&config.s3).await?),
            other => {
                return Err(AppError::configuration(format!(
                    "Unsupported storage provider: '{other}'"
                )));
            }
        };

        info!(provider = inner.provider_type(), "Object storage initialized");
        Ok(Self { inner })
    }

    /// Wrap an already constructed provider.
    pub fn from_provider(provider: Arc<dyn ObjectStorage>) -> Self {
        Self { inner: provider }
    }
}

#[async_trait]
impl ObjectStorage for StorageManager {
    fn provider_type(&self) -> &str {
        self.inner.provider_type()
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.inner.health_check().await
    }

    async fn put_object(&self, key: &str, data: Bytes, content_type: &str) -> AppResult<()> {
        self.inner.put_object(key, data, content_type).await
    }

    async fn presigned_get_url(&self, key: &str, expires_in: Duration) -> AppResult<String> {
        self.inner.presigned_get_url(key, expires_in).await
    }

    async fn delete_object(&self, key: &str) -> AppResult<()> {
        self.inner.delete_object(key).await
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        self.inner.exists(key).await
    }
}
