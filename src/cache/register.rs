//! 缓存后端注册表，由 [`declare_object_cache_plugin!`](crate::declare_object_cache_plugin) 在加载时填充

use crate::cache::ObjectCache;
use crate::errors::Result;
use once_cell::sync::Lazy;
use std::{
    collections::BTreeMap,
    future::Future,
    pin::Pin,
    sync::{Arc, PoisonError, RwLock},
};

pub type BoxedObjectCacheFuture =
    Pin<Box<dyn Future<Output = Result<Box<dyn ObjectCache>>> + Send>>;
pub type ObjectCacheConstructor = Arc<dyn Fn() -> BoxedObjectCacheFuture + Send + Sync>;

static CACHE_BACKENDS: Lazy<RwLock<BTreeMap<String, ObjectCacheConstructor>>> =
    Lazy::new(|| RwLock::new(BTreeMap::new()));

pub fn register_object_cache_plugin<S: Into<String>>(name: S, constructor: ObjectCacheConstructor) {
    CACHE_BACKENDS
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .insert(name.into().to_ascii_lowercase(), constructor);
}

/// 按配置中的 `cache.type` 查找后端，大小写不敏感
pub fn get_object_cache_plugin(name: &str) -> Option<ObjectCacheConstructor> {
    CACHE_BACKENDS
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&name.trim().to_ascii_lowercase())
        .cloned()
}

pub fn registered_cache_backends() -> Vec<String> {
    CACHE_BACKENDS
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .keys()
        .cloned()
        .collect()
}

pub fn debug_object_cache_registry() {
    let backends = registered_cache_backends();
    if backends.is_empty() {
        tracing::debug!("No cache backends registered");
    } else {
        tracing::debug!("Cache backends available: {}", backends.join(", "));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheResult;

    #[test]
    fn test_builtin_backends_registered() {
        let backends = registered_cache_backends();
        assert!(backends.contains(&"moka".to_string()));
        assert!(backends.contains(&"redis".to_string()));
        assert!(get_object_cache_plugin(" Moka ").is_some());
        assert!(get_object_cache_plugin("memcached").is_none());
    }

    #[tokio::test]
    async fn test_moka_backend_constructs() {
        let constructor = get_object_cache_plugin("moka").unwrap();
        let cache = constructor().await.unwrap();
        cache
            .insert_raw("public:posts".into(), "[]".into(), 0)
            .await;
        assert!(matches!(
            cache.get_raw("public:posts").await,
            CacheResult::Found(ref v) if v == "[]"
        ));
    }
}
