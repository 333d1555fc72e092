//! Single-entry cache of the newest-ID list.

use std::sync::Arc;
use std::time::Instant;

use hn_core::{HnError, ItemId, ItemSource, RequestContext, Result};
use moka::future::Cache;
use tracing::{debug, info};

use super::entry::{EntryExpiry, Expiring, IdListEntry};
use super::jitter::Jitter;
use super::policy::TtlRange;
use super::removal_reason;
use crate::metrics::CacheMetrics;

const NEWEST_IDS_KEY: &str = "hn:newstories:ids";

/// Cache of the upstream newest-ID list.
///
/// A hit returns the stored snapshot untouched. A miss fetches the list from
/// the [`ItemSource`] and stores it with a TTL picked from `ttl`. Concurrent
/// misses share one upstream call.
#[derive(Clone)]
pub struct IdCache {
    inner: Cache<&'static str, Arc<IdListEntry>>,
    source: Arc<dyn ItemSource>,
    ttl: TtlRange,
    jitter: Arc<dyn Jitter>,
    metrics: CacheMetrics,
}

impl IdCache {
    pub fn new(source: Arc<dyn ItemSource>, ttl: TtlRange, jitter: Arc<dyn Jitter>) -> Self {
        let metrics = CacheMetrics::new("ids");

        let eviction_metrics = metrics.clone();
        let inner = Cache::builder()
            .max_capacity(1)
            .expire_after(EntryExpiry)
            .eviction_listener(move |_key, _value, cause| {
                eviction_metrics.record_eviction(removal_reason(cause));
            })
            .build();

        Self {
            inner,
            source,
            ttl,
            jitter,
            metrics,
        }
    }

    /// Returns the newest IDs, newest first.
    pub async fn get_newest_ids(&self, ctx: &RequestContext) -> Result<Arc<[ItemId]>> {
        if let Some(entry) = self.inner.get(NEWEST_IDS_KEY).await {
            self.metrics.record_hit();
            debug!(count = entry.value().len(), "ID list cache hit");
            return Ok(Arc::clone(entry.value()));
        }

        self.metrics.record_miss();
        debug!("ID list cache miss");

        let source = Arc::clone(&self.source);
        let ttl = self.ttl;
        let jitter = Arc::clone(&self.jitter);
        let metrics = self.metrics.clone();

        // The loader must not observe `ctx`: it may be shared with other
        // requests waiting on the same key.
        let load = self.inner.try_get_with(NEWEST_IDS_KEY, async move {
            let start = Instant::now();
            let ids = source.list_newest_ids().await?;
            let ttl = ttl.pick(jitter.as_ref());
            metrics.record_load_duration(start.elapsed());

            info!(
                source = source.name(),
                count = ids.len(),
                ttl_secs = ttl.as_secs(),
                "Cached newest ID list"
            );
            Ok::<_, HnError>(Arc::new(Expiring::new(Arc::<[ItemId]>::from(ids), ttl)))
        });

        let entry = ctx
            .run(async { load.await.map_err(|e: Arc<HnError>| (*e).clone()) })
            .await?;

        self.metrics.update_entry_count(self.inner.entry_count());
        Ok(Arc::clone(entry.value()))
    }

    /// Returns the cached snapshot without loading it.
    pub async fn peek(&self) -> Option<Arc<IdListEntry>> {
        self.inner.get(NEWEST_IDS_KEY).await
    }

    /// Drops the cached snapshot so the next call refetches it.
    pub async fn invalidate(&self) {
        self.inner.invalidate(NEWEST_IDS_KEY).await;
    }

    pub fn metrics(&self) -> &CacheMetrics {
        &self.metrics
    }
}
