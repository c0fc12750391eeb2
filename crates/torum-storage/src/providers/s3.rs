//! S3-compatible object storage provider.

use std::time::Duration;

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::Client;
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use tracing::{debug, info, warn};

use torum_core::config::storage::S3StorageConfig;
use torum_core::error::AppError;
use torum_core::result::AppResult;
use torum_core::traits::storage::{ObjectStorage, validate_key};

/// Provider name attached to credentials taken from configuration.
const CONFIG_CREDENTIALS_PROVIDER: &str = "torum-config";

/// S3-compatible storage provider (AWS S3, MinIO, ...).
#[derive(Debug, Clone)]
pub struct S3ObjectStorage {
    client: Client,
    bucket: String,
}

impl S3ObjectStorage {
    /// Build a client from configuration.
    ///
    /// Static credentials are used when `access_key` is set, otherwise the
    /// default AWS provider chain applies. A non-empty `endpoint` targets an
    /// S3 clone instead of AWS.
    pub async fn new(config: &S3StorageConfig) -> AppResult<Self> {
        if config.bucket.is_empty() {
            return Err(AppError::configuration("S3 bucket name is required"));
        }

        info!(
            endpoint = %config.endpoint,
            region = %config.region,
            bucket = %config.bucket,
            "Initializing S3 storage provider"
        );

        let mut loader =
            aws_config::defaults(BehaviorVersion::latest()).region(Region::new(config.region.clone()));
        if !config.access_key.is_empty() {
            loader = loader.credentials_provider(Credentials::new(
                config.access_key.clone(),
                config.secret_key.clone(),
                None,
                None,
                CONFIG_CREDENTIALS_PROVIDER,
            ));
        }
        let shared = loader.load().await;

        let mut builder =
            aws_sdk_s3::config::Builder::from(&shared).force_path_style(config.force_path_style);
        if !config.endpoint.is_empty() {
            builder = builder.endpoint_url(config.endpoint.clone());
        }

        Ok(Self {
            client: Client::from_conf(builder.build()),
            bucket: config.bucket.clone(),
        })
    }

    /// Fail early when the bucket is missing or unreachable.
    async fn ensure_bucket(&self) -> AppResult<()> {
        self.client
            .head_bucket()
            .bucket(&self.bucket)
            .send()
            .await
            .map_err(|e| {
                AppError::storage(format!(
                    "Bucket {} is not accessible: {}",
                    self.bucket,
                    DisplayErrorContext(&e)
                ))
            })?;
        Ok(())
    }
}

#[async_trait]
impl ObjectStorage for S3ObjectStorage {
    fn provider_type(&self) -> &str {
        "s3"
    }

    async fn health_check(&self) -> AppResult<bool> {
        match self.ensure_bucket().await {
            Ok(()) => Ok(true),
            Err(e) => {
                warn!(error = %e, "S3 health check failed");
                Ok(false)
            }
        }
    }

    async fn put_object(&self, key: &str, data: Bytes, content_type: &str) -> AppResult<()> {
        validate_key(key)?;
        self.ensure_bucket().await?;

        let size = data.len();
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(data))
            .send()
            .await
            .map_err(|e| {
                AppError::storage(format!(
                    "Failed to upload object {key}: {}",
                    DisplayErrorContext(&e)
                ))
            })?;

        debug!(key, bytes = size, "Uploaded object to S3");
        Ok(())
    }

    async fn presigned_get_url(&self, key: &str, expires_in: Duration) -> AppResult<String> {
        validate_key(key)?;
        let presign = PresigningConfig::expires_in(expires_in)
            .map_err(|e| AppError::storage(format!("Invalid presign lifetime: {e}")))?;

        let request = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(presign)
            .await
            .map_err(|e| {
                AppError::storage(format!(
                    "Failed to presign {key}: {}",
                    DisplayErrorContext(&e)
                ))
            })?;

        Ok(request.uri().to_string())
    }

    async fn delete_object(&self, key: &str) -> AppResult<()> {
        validate_key(key)?;
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                AppError::storage(format!(
                    "Failed to delete object {key}: {}",
                    DisplayErrorContext(&e)
                ))
            })?;

        debug!(key, "Deleted object from S3");
        Ok(())
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        validate_key(key)?;
        match self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
        {
            Ok(_) => Ok(true),
            Err(e) => match e.as_service_error() {
                Some(service_err) if service_err.is_not_found() => Ok(false),
                _ => Err(AppError::storage(format!(
                    "Failed to check object {key}: {}",
                    DisplayErrorContext(&e)
                ))),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minio_config() -> S3StorageConfig {
        S3StorageConfig {
            endpoint: "http://localhost:9000".to_string(),
            region: "us-east-1".to_string(),
            bucket: "torum-docs".to_string(),
            access_key: "minioadmin".to_string(),
            secret_key: "minioadmin".to_string(),
            force_path_style: true,
        }
    }

    #[tokio::test]
    async fn test_requires_bucket() {
        let mut config = minio_config();
        config.bucket.clear();
        assert!(S3ObjectStorage::new(&config).await.is_err());
    }

    #[tokio::test]
    async fn test_presigned_url_is_path_style_and_bounded() {
        let storage = S3ObjectStorage::new(&minio_config()).await.unwrap();
        let url = storage
            .presigned_get_url("documents/owner/file.pdf", Duration::from_secs(600))
            .await
            .unwrap();

        assert!(
            url.starts_with("http://localhost:9000/torum-docs/documents/owner/file.pdf?"),
            "unexpected url {url}"
        );
        assert!(url.contains("X-Amz-Expires=600"));
        assert!(url.contains("X-Amz-Signature="));
    }

    #[tokio::test]
    async fn test_rejects_invalid_keys_before_network() {
        let storage = S3ObjectStorage::new(&minio_config()).await.unwrap();
        let err = storage
            .presigned_get_url("/absolute.pdf", Duration::from_secs(60))
            .await
            .unwrap_err();
        assert_eq!(err.kind, torum_core::error::ErrorKind::Validation);
    }
}
