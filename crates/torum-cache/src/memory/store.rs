//! In-memory cache implementation using the moka crate.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use moka::Expiry;
use moka::future::Cache;

use torum_core::config::cache::MemoryCacheConfig;
use torum_core::error::{AppError, ErrorKind};
use torum_core::result::AppResult;
use torum_core::traits::cache::CacheProvider;

/// A cached value together with the TTL it was written with.
#[derive(Debug, Clone)]
struct CacheEntry {
    value: String,
    ttl: Duration,
    /// Counter updates keep the deadline set when the counter was created.
    keep_expiry: bool,
}

/// Per-entry expiry policy driven by [`CacheEntry::ttl`].
struct EntryExpiry;

impl Expiry<String, CacheEntry> for EntryExpiry {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &CacheEntry,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &CacheEntry,
        _updated_at: Instant,
        duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        if value.keep_expiry {
            duration_until_expiry
        } else {
            Some(value.ttl)
        }
    }
}

/// In-memory cache provider using moka.
#[derive(Debug, Clone)]
pub struct MemoryCacheProvider {
    /// The underlying moka cache.
    cache: Cache<String, CacheEntry>,
}

impl MemoryCacheProvider {
    /// Create a new in-memory cache from configuration.
    pub fn new(config: &MemoryCacheConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.max_capacity)
            .expire_after(EntryExpiry)
            .build();

        Self { cache }
    }
}

#[async_trait]
impl CacheProvider for MemoryCacheProvider {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.cache.get(key).await.map(|entry| entry.value))
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
        let entry = CacheEntry {
            value: value.to_string(),
            ttl,
            keep_expiry: false,
        };
        self.cache.insert(key.to_string(), entry).await;
        Ok(())
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.cache.invalidate(key).await;
        Ok(())
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        Ok(self.cache.get(key).await.is_some())
    }

    async fn incr(&self, key: &str, ttl: Duration) -> AppResult<i64> {
        let entry = self
            .cache
            .entry(key.to_string())
            .and_upsert_with(|existing| {
                let next = match existing {
                    Some(current) => {
                        let count = current.value().value.parse::<i64>().unwrap_or(0) + 1;
                        CacheEntry {
                            value: count.to_string(),
                            ttl,
                            keep_expiry: true,
                        }
                    }
                    None => CacheEntry {
                        value: "1".to_string(),
                        ttl,
                        keep_expiry: false,
                    },
                };
                std::future::ready(next)
            })
            .await;

        entry.into_value().value.parse::<i64>().map_err(|e| {
            AppError::with_source(ErrorKind::Cache, format!("Counter {key} is not numeric"), e)
        })
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_provider() -> MemoryCacheProvider {
        let config = MemoryCacheConfig { max_capacity: 1000 };
        MemoryCacheProvider::new(&config)
    }

    #[tokio::test]
    async fn test_set_get() {
        let provider = make_provider();
        provider
            .set("key1", "value1", Duration::from_secs(60))
            .await
            .unwrap();
        let val = provider.get("key1").await.unwrap();
        assert_eq!(val, Some("value1".to_string()));
        assert!(provider.exists("key1").await.unwrap());
    }

    #[tokio::test]
    async fn test_delete() {
        let provider = make_provider();
        provider
            .set("key2", "value2", Duration::from_secs(60))
            .await
            .unwrap();
        provider.delete("key2").await.unwrap();
        assert_eq!(provider.get("key2").await.unwrap(), None);
        assert!(!provider.exists("key2").await.unwrap());
    }

    #[tokio::test]
    async fn test_entry_expires_after_its_own_ttl() {
        let provider = make_provider();
        provider
            .set("short", "v", Duration::from_millis(50))
            .await
            .unwrap();
        provider
            .set("long", "v", Duration::from_secs(60))
            .await
            .unwrap();

        tokio::time::sleep(Duration::from_millis(150)).await;

        assert_eq!(provider.get("short").await.unwrap(), None);
        assert_eq!(provider.get("long").await.unwrap().as_deref(), Some("v"));
    }

    #[tokio::test]
    async fn test_incr_counts_up() {
        let provider = make_provider();
        let ttl = Duration::from_secs(60);
        assert_eq!(provider.incr("counter", ttl).await.unwrap(), 1);
        assert_eq!(provider.incr("counter", ttl).await.unwrap(), 2);
        assert_eq!(provider.incr("counter", ttl).await.unwrap(), 3);
        assert_eq!(provider.get("counter").await.unwrap().as_deref(), Some("3"));
    }

    #[tokio::test]
    async fn test_incr_keeps_original_deadline() {
        let provider = make_provider();
        provider
            .incr("window", Duration::from_millis(300))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(200)).await;
        provider
            .incr("window", Duration::from_millis(300))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(200)).await;

        assert_eq!(provider.get("window").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_health_check() {
        let provider = make_provider();
        assert!(provider.health_check().await.unwrap());
    }
}
