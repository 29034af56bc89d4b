use async_trait::async_trait;
use moka::future::Cache;
use tracing::debug;

use crate::cache::{CacheResult, ObjectCache};
use crate::config::AppConfig;
use crate::declare_object_cache_plugin;

declare_object_cache_plugin!("moka", MokaCacheWrapper);

pub struct MokaCacheWrapper {
    inner: Cache<String, String>,
}

impl MokaCacheWrapper {
    pub fn new() -> Result<Self, String> {
        let config = AppConfig::get();
        let inner = Cache::builder()
            .max_capacity(config.cache.memory.max_capacity)
            .time_to_live(std::time::Duration::from_secs(config.cache.default_ttl))
            .support_invalidation_closures()
            .build();

        debug!(
            "MokaCacheWrapper initialized with max capacity: {}",
            config.cache.memory.max_capacity
        );
        Ok(Self { inner })
    }
}

#[async_trait]
impl ObjectCache for MokaCacheWrapper {
    async fn get_raw(&self, key: &str) -> CacheResult<String> {
        if let Some(value) = self.inner.get(key).await {
            debug!("Successfully retrieved key: {}", key);
            CacheResult::Found(value)
        } else {
            debug!("Key not found in cache: {}", key);
            CacheResult::NotFound
        }
    }

    async fn insert_raw(&self, key: String, value: String, ttl: u64) {
        // 单条 TTL 不生效，统一使用构建时的 TTL
        self.inner.insert(key, value).await;
        if ttl != 0 {
            debug!("Moka cache ignores per-item TTL");
        }
    }

    async fn remove(&self, key: &str) {
        self.inner.invalidate(key).await;
    }

    async fn invalidate_all(&self) {
        self.inner.invalidate_all();
    }

    async fn invalidate_prefix(&self, prefix: &str) {
        let prefix = prefix.to_string();
        if let Err(e) = self
            .inner
            .invalidate_entries_if(move |key, _| key.starts_with(&prefix))
        {
            tracing::warn!("Failed to invalidate cache entries by prefix: {}", e);
        }
        self.inner.run_pending_tasks().await;
    }
}

#[cfg(test)]
impl MokaCacheWrapper {
    pub(crate) fn for_tests() -> Self {
        Self {
            inner: Cache::builder()
                .max_capacity(100)
                .support_invalidation_closures()
                .build(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_invalidate_prefix_keeps_other_keys() {
        let cache = MokaCacheWrapper::for_tests();
        cache.insert_raw("public:home".into(), "1".into(), 0).await;
        cache.insert_raw("public:staff".into(), "2".into(), 0).await;
        cache.insert_raw("user:1".into(), "3".into(), 0).await;

        cache.invalidate_prefix("public:").await;

        assert_eq!(cache.get_raw("public:home").await, CacheResult::NotFound);
        assert_eq!(cache.get_raw("public:staff").await, CacheResult::NotFound);
        assert_eq!(cache.get_raw("user:1").await, CacheResult::Found("3".into()));
    }
}
