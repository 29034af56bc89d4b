//! 公开内容变更事件总线
//!
//! 管理端写操作发布 [`ContentUpdated`]，后台任务订阅后清空公开页面缓存。

use std::sync::Arc;

use once_cell::sync::Lazy;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::cache::{ObjectCache, PUBLIC_CACHE_PREFIX};
use crate::models::events::ContentUpdated;

static CONTENT_EVENT_BUS: Lazy<ContentEventBus> = Lazy::new(|| ContentEventBus::new(256));

pub struct ContentEventBus {
    sender: broadcast::Sender<ContentUpdated>,
}

impl ContentEventBus {
    fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// 获取全局实例
    pub fn get() -> &'static Self {
        &CONTENT_EVENT_BUS
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ContentUpdated> {
        self.sender.subscribe()
    }

    /// 发布事件，没有订阅者时直接丢弃
    pub fn publish(&self, event: ContentUpdated) {
        debug!(
            "{} on {}: {} {} {:?}",
            event.event_name(),
            event.channel(),
            event.content_type,
            event.action,
            event.id
        );
        let _ = self.sender.send(event);
    }

    pub fn content_updated(
        &self,
        content_type: &str,
        action: &str,
        id: Option<i64>,
        title: Option<&str>,
    ) {
        self.publish(ContentUpdated::new(
            content_type,
            action,
            id,
            title.map(str::to_string),
        ));
    }
}

/// 订阅内容事件并清空公开缓存
pub fn spawn_cache_invalidator(
    mut receiver: broadcast::Receiver<ContentUpdated>,
    cache: Arc<dyn ObjectCache>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    cache.invalidate_prefix(PUBLIC_CACHE_PREFIX).await;
                    debug!(
                        "Public cache cleared after {} {}",
                        event.content_type, event.action
                    );
                }
                // 落后时直接清空一次即可
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!("Cache invalidator lagged by {} events", skipped);
                    cache.invalidate_prefix(PUBLIC_CACHE_PREFIX).await;
                }
                Err(broadcast::error::RecvError::Closed) => {
                    info!("Content event bus closed, stopping cache invalidator");
                    break;
                }
            }
        }
    })
}

/// 测试中检查是否收到指定事件
#[cfg(test)]
pub(crate) fn received(
    receiver: &mut broadcast::Receiver<ContentUpdated>,
    content_type: &str,
    action: &str,
    title: Option<&str>,
) -> bool {
    loop {
        match receiver.try_recv() {
            Ok(event) => {
                if event.content_type == content_type
                    && event.action == action
                    && event.title.as_deref() == title
                {
                    return true;
                }
            }
            Err(broadcast::error::TryRecvError::Lagged(_)) => continue,
            Err(_) => return false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheResult;
    use crate::cache::object_cache::moka::MokaCacheWrapper;

    #[tokio::test]
    async fn test_event_clears_public_cache() {
        let bus = ContentEventBus::new(8);
        let cache: Arc<dyn ObjectCache> = Arc::new(MokaCacheWrapper::for_tests());
        cache.insert_raw("public:home".into(), "{}".into(), 0).await;
        cache.insert_raw("user:token".into(), "{}".into(), 0).await;

        let handle = spawn_cache_invalidator(bus.subscribe(), cache.clone());
        bus.content_updated("post", "created", Some(1), Some("Pengumuman"));
        drop(bus);
        handle.await.unwrap();

        assert_eq!(cache.get_raw("public:home").await, CacheResult::NotFound);
        assert_eq!(
            cache.get_raw("user:token").await,
            CacheResult::Found("{}".to_string())
        );
    }
}
