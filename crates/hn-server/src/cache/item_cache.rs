//! Per-ID cache of item resolutions, tombstones included.

use std::sync::Arc;
use std::time::Instant;

use hn_core::{HnError, Item, ItemId, ItemSource, RequestContext, Result};
use moka::future::Cache;
use tracing::debug;

use super::entry::{CachedItem, EntryExpiry, Expiring, ItemEntry};
use super::jitter::Jitter;
use super::policy::TtlPolicy;
use super::removal_reason;
use crate::metrics::CacheMetrics;

/// Cache of `id -> Item or tombstone`.
///
/// A hit, valid or tombstone, never reaches the [`ItemSource`]. A miss asks
/// the source and caches whatever it resolved to, with a TTL that depends
/// on the outcome ([`TtlPolicy::for_item`]). Source failures are returned
/// and not cached.
#[derive(Clone)]
pub struct ItemCache {
    inner: Cache<ItemId, Arc<ItemEntry>>,
    source: Arc<dyn ItemSource>,
    policy: TtlPolicy,
    jitter: Arc<dyn Jitter>,
    metrics: CacheMetrics,
}

impl ItemCache {
    pub fn new(
        source: Arc<dyn ItemSource>,
        policy: TtlPolicy,
        jitter: Arc<dyn Jitter>,
        max_capacity: u64,
    ) -> Self {
        let metrics = CacheMetrics::new("items");

        // Configurar listener para evictions
        let eviction_metrics = metrics.clone();
        let inner = Cache::builder()
            .max_capacity(max_capacity)
            .expire_after(EntryExpiry)
            .eviction_listener(move |_key, _value, cause| {
                eviction_metrics.record_eviction(removal_reason(cause));
            })
            .build();

        Self {
            inner,
            source,
            policy,
            jitter,
            metrics,
        }
    }

    /// Resolves `id` to an item, or `None` if it resolves to nothing.
    pub async fn get_item(&self, id: ItemId, ctx: &RequestContext) -> Result<Option<Item>> {
        if let Some(entry) = self.inner.get(&id).await {
            self.metrics.record_hit();
            return Ok(entry.value().item().cloned());
        }

        self.metrics.record_miss();

        let source = Arc::clone(&self.source);
        let policy = self.policy;
        let jitter = Arc::clone(&self.jitter);
        let metrics = self.metrics.clone();

        let load = self.inner.try_get_with(id, async move {
            let start = Instant::now();
            let resolved = CachedItem::from(source.get_item(id).await?);
            let ttl = policy.for_item(&resolved, jitter.as_ref());
            metrics.record_load_duration(start.elapsed());

            if resolved.is_tombstone() {
                metrics.record_tombstone();
                debug!(item_id = id, ttl_secs = ttl.as_secs(), "Item resolved to nothing, caching tombstone");
            } else {
                debug!(item_id = id, ttl_secs = ttl.as_secs(), "Item cached");
            }

            Ok::<_, HnError>(Arc::new(Expiring::new(resolved, ttl)))
        });

        let entry = ctx
            .run(async { load.await.map_err(|e: Arc<HnError>| (*e).clone()) })
            .await?;

        self.metrics.update_entry_count(self.inner.entry_count());
        Ok(entry.value().item().cloned())
    }

    /// Returns the cached resolution of `id` without loading it.
    pub async fn peek(&self, id: ItemId) -> Option<Arc<ItemEntry>> {
        self.inner.get(&id).await
    }

    /// Retorna el numero aproximado de entries en cache.
    pub fn entry_count(&self) -> u64 {
        self.inner.entry_count()
    }

    pub fn metrics(&self) -> &CacheMetrics {
        &self.metrics
    }

    /// Runs moka's pending maintenance so counts are exact.
    pub async fn sync(&self) {
        self.inner.run_pending_tasks().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::jitter::FixedJitter;
    use crate::cache::policy::TtlRange;
    use async_trait::async_trait;
    use hn_core::SourceError;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    /// Odd IDs are stories, even IDs resolve to nothing, 13 fails.
    #[derive(Debug, Default)]
    struct OddStories {
        calls: parking_lot::Mutex<HashMap<ItemId, u32>>,
        total: AtomicU32,
    }

    impl OddStories {
        fn calls_for(&self, id: ItemId) -> u32 {
            self.calls.lock().get(&id).copied().unwrap_or(0)
        }
    }

    #[async_trait]
    impl ItemSource for OddStories {
        async fn list_newest_ids(&self) -> std::result::Result<Vec<ItemId>, SourceError> {
            Ok(vec![])
        }

        async fn get_item(&self, id: ItemId) -> std::result::Result<Option<Item>, SourceError> {
            *self.calls.lock().entry(id).or_default() += 1;
            self.total.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(10)).await;

            match id {
                13 => Err(SourceError::status(500, "item/13.json")),
                id if id % 2 == 1 => Ok(Some(Item::new(id, Some(format!("Story {}", id)), None, "pg", 0))),
                _ => Ok(None),
            }
        }

        fn name(&self) -> &str {
            "odd"
        }
    }

    fn cache(source: &Arc<OddStories>) -> ItemCache {
        ItemCache::new(source.clone(), TtlPolicy::default(), Arc::new(FixedJitter), 100)
    }

    #[tokio::test]
    async fn test_valid_item_is_cached() {
        let source = Arc::new(OddStories::default());
        let cache = cache(&source);
        let ctx = RequestContext::new();

        let first = cache.get_item(1, &ctx).await.unwrap();
        let second = cache.get_item(1, &ctx).await.unwrap();

        assert_eq!(first.as_ref().map(|i| i.id), Some(1));
        assert_eq!(first, second);
        assert_eq!(source.calls_for(1), 1);
    }

    #[tokio::test]
    async fn test_tombstone_is_cached_with_short_ttl() {
        let source = Arc::new(OddStories::default());
        let cache = cache(&source);
        let ctx = RequestContext::new();

        assert!(cache.get_item(2, &ctx).await.unwrap().is_none());
        assert!(cache.get_item(2, &ctx).await.unwrap().is_none());
        assert_eq!(source.calls_for(2), 1);

        let entry = cache.peek(2).await.unwrap();
        assert!(entry.value().is_tombstone());
        assert_eq!(entry.ttl(), Duration::from_secs(60));

        cache.get_item(3, &ctx).await.unwrap();
        assert_eq!(cache.peek(3).await.unwrap().ttl(), Duration::from_secs(300));
    }

    #[tokio::test]
    async fn test_tombstone_expires_before_valid_item() {
        let source = Arc::new(OddStories::default());
        let policy = TtlPolicy {
            ids: TtlRange::fixed(Duration::from_millis(150)),
            item: TtlRange::fixed(Duration::from_millis(600)),
            tombstone: TtlRange::fixed(Duration::from_millis(150)),
        };
        let cache = ItemCache::new(source.clone(), policy, Arc::new(FixedJitter), 100);
        let ctx = RequestContext::new();

        cache.get_item(1, &ctx).await.unwrap();
        cache.get_item(2, &ctx).await.unwrap();

        // moka expira con su propio reloj, no sirve tiempo pausado
        tokio::time::sleep(Duration::from_millis(300)).await;

        assert!(cache.get_item(1, &ctx).await.unwrap().is_some());
        assert!(cache.get_item(2, &ctx).await.unwrap().is_none());
        assert_eq!(source.calls_for(1), 1);
        assert_eq!(source.calls_for(2), 2);
    }

    #[tokio::test]
    async fn test_failure_is_not_cached() {
        let source = Arc::new(OddStories::default());
        let cache = cache(&source);
        let ctx = RequestContext::new();

        let err = cache.get_item(13, &ctx).await.unwrap_err();
        assert!(matches!(
            err,
            HnError::Upstream(SourceError::Status { status: 500, .. })
        ));

        cache.get_item(13, &ctx).await.unwrap_err();
        assert_eq!(source.calls_for(13), 2);
        assert!(cache.peek(13).await.is_none());
    }

    #[tokio::test]
    async fn test_concurrent_misses_for_same_id_coalesce() {
        let source = Arc::new(OddStories::default());
        let cache = cache(&source);

        let mut handles = vec![];
        for _ in 0..50 {
            let cache = cache.clone();
            handles.push(tokio::spawn(async move {
                cache.get_item(7, &RequestContext::new()).await
            }));
        }
        for handle in handles {
            assert!(handle.await.unwrap().unwrap().is_some());
        }

        assert_eq!(source.calls_for(7), 1);
    }

    #[tokio::test]
    async fn test_cancelled_waiter_does_not_fail_others() {
        let source = Arc::new(OddStories::default());
        let cache = cache(&source);

        let doomed = RequestContext::new();
        let cancelled = {
            let cache = cache.clone();
            let ctx = doomed.clone();
            tokio::spawn(async move { cache.get_item(9, &ctx).await })
        };
        let survivor = {
            let cache = cache.clone();
            tokio::spawn(async move { cache.get_item(9, &RequestContext::new()).await })
        };

        tokio::time::sleep(Duration::from_millis(2)).await;
        doomed.cancel();

        assert!(cancelled.await.unwrap().unwrap_err().is_cancelled());
        assert_eq!(survivor.await.unwrap().unwrap().map(|i| i.id), Some(9));
    }

    #[tokio::test]
    async fn test_entry_count() {
        let source = Arc::new(OddStories::default());
        let cache = cache(&source);
        let ctx = RequestContext::new();

        for id in 1..=6 {
            cache.get_item(id, &ctx).await.unwrap();
        }
        cache.sync().await;

        assert_eq!(cache.entry_count(), 6);
        assert_eq!(source.total.load(Ordering::SeqCst), 6);
    }
}
