//! Shared engine state: one ID cache, one item cache, one limiter.

use std::sync::Arc;

use hn_core::ItemSource;
use tracing::info;

use super::aggregator::{DEFAULT_SEARCH_WINDOW, StoryAggregator};
use super::fetcher::BoundedFetcher;
use super::limiter::{AdmissionLimiter, DEFAULT_MAX_CONCURRENCY};
use crate::cache::{IdCache, ItemCache, Jitter, RandomJitter, TtlPolicy};

/// Tunables of the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Simultaneous item loads, process-wide.
    pub max_concurrency: usize,
    /// IDs scanned by a search.
    pub search_window: usize,
    pub ttl: TtlPolicy,
    /// Maximum number of item resolutions kept.
    pub max_cached_items: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            search_window: DEFAULT_SEARCH_WINDOW,
            ttl: TtlPolicy::default(),
            max_cached_items: 10_000,
        }
    }
}

/// Owns the state every request shares.
///
/// Build one per process and hand out aggregators with
/// [`aggregator`](Self::aggregator); they all see the same caches and
/// compete for the same limiter.
#[derive(Clone)]
pub struct FeedEngine {
    ids: Arc<IdCache>,
    items: Arc<ItemCache>,
    limiter: AdmissionLimiter,
    search_window: usize,
}

impl FeedEngine {
    pub fn new(source: Arc<dyn ItemSource>, config: EngineConfig) -> Self {
        Self::with_jitter(source, config, Arc::new(RandomJitter))
    }

    /// Like [`new`](Self::new) with an explicit random source for TTLs.
    pub fn with_jitter(
        source: Arc<dyn ItemSource>,
        config: EngineConfig,
        jitter: Arc<dyn Jitter>,
    ) -> Self {
        info!(
            source = source.name(),
            max_concurrency = config.max_concurrency,
            search_window = config.search_window,
            max_cached_items = config.max_cached_items,
            "Feed engine initialized"
        );

        let ids = IdCache::new(Arc::clone(&source), config.ttl.ids, Arc::clone(&jitter));
        let items = ItemCache::new(source, config.ttl, jitter, config.max_cached_items);

        Self {
            ids: Arc::new(ids),
            items: Arc::new(items),
            limiter: AdmissionLimiter::new(config.max_concurrency),
            search_window: config.search_window,
        }
    }

    pub fn aggregator(&self) -> StoryAggregator {
        StoryAggregator::new(Arc::clone(&self.ids), self.fetcher())
            .with_search_window(self.search_window)
    }

    pub fn fetcher(&self) -> BoundedFetcher {
        BoundedFetcher::new(Arc::clone(&self.items), self.limiter.clone())
    }

    pub fn id_cache(&self) -> &IdCache {
        &self.ids
    }

    pub fn item_cache(&self) -> &ItemCache {
        &self.items
    }

    pub fn limiter(&self) -> &AdmissionLimiter {
        &self.limiter
    }
}
