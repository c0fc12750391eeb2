//! Redis cache provider implementation.

use std::time::Duration;

use async_trait::async_trait;
use redis::AsyncCommands;
use tracing::debug;

use torum_core::error::{AppError, ErrorKind};
use torum_core::result::AppResult;
use torum_core::traits::cache::CacheProvider;

use super::client::RedisClient;

/// Redis-backed cache provider.
#[derive(Debug, Clone)]
pub struct RedisCacheProvider {
    /// Redis client.
    client: RedisClient,
}

impl RedisCacheProvider {
    /// Create a new Redis cache provider.
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    /// Map a Redis error to an AppError.
    ///
    /// A server that cannot be reached is reported as unavailable rather
    /// than as a failed command.
    fn map_err(e: redis::RedisError) -> AppError {
        if e.is_connection_refusal() || e.is_connection_dropped() || e.is_timeout() {
            return AppError::service_unavailable(format!("Cache is unavailable: {e}"));
        }
        AppError::with_source(ErrorKind::Cache, format!("Redis error: {e}"), e)
    }
}

/// Redis rejects `SETEX` with a zero TTL, so sub-second values round up.
fn ttl_seconds(ttl: Duration) -> u64 {
    ttl.as_secs().max(1)
}

#[async_trait]
impl CacheProvider for RedisCacheProvider {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let full_key = self.client.prefixed_key(key);
        let mut conn = self.client.conn_mut();
        let result: Option<String> = conn.get(&full_key).await.map_err(Self::map_err)?;
        Ok(result)
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
        let full_key = self.client.prefixed_key(key);
        let mut conn = self.client.conn_mut();
        let _: () = conn
            .set_ex(&full_key, value, ttl_seconds(ttl))
            .await
            .map_err(Self::map_err)?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        let full_key = self.client.prefixed_key(key);
        let mut conn = self.client.conn_mut();
        let _: () = conn.del(&full_key).await.map_err(Self::map_err)?;
        Ok(())
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        let full_key = self.client.prefixed_key(key);
        let mut conn = self.client.conn_mut();
        let result: bool = conn.exists(&full_key).await.map_err(Self::map_err)?;
        Ok(result)
    }

    async fn incr(&self, key: &str, ttl: Duration) -> AppResult<i64> {
        let full_key = self.client.prefixed_key(key);
        let mut conn = self.client.conn_mut();
        let count: i64 = conn.incr(&full_key, 1).await.map_err(Self::map_err)?;

        if count == 1 {
            let seconds = i64::try_from(ttl_seconds(ttl)).unwrap_or(i64::MAX);
            let _: () = conn
                .expire(&full_key, seconds)
                .await
                .map_err(Self::map_err)?;
            debug!(key = %full_key, ttl_secs = seconds, "Started counter window");
        }

        Ok(count)
    }

    async fn health_check(&self) -> AppResult<bool> {
        let mut conn = self.client.conn_mut();
        let result: Result<String, _> = redis::cmd("PING").query_async(&mut conn).await;
        match result {
            Ok(pong) => Ok(pong == "PONG"),
            Err(e) => {
                debug!(error = %e, "Redis health check failed");
                Ok(false)
            }
        }
    }
}
