//! Cache metrics recording.

use metrics::{counter, gauge, histogram};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Registra las metricas de cache.
pub fn register_cache_metrics() {
    metrics::describe_counter!("hn_cache_hits_total", "Total number of cache hits");
    metrics::describe_counter!("hn_cache_misses_total", "Total number of cache misses");
    metrics::describe_counter!("hn_cache_evictions_total", "Total number of cache evictions");
    metrics::describe_counter!(
        "hn_cache_tombstones_total",
        "Total number of items cached as absent"
    );
    metrics::describe_gauge!("hn_cache_entries", "Current number of entries in cache");
    metrics::describe_histogram!(
        "hn_cache_load_seconds",
        "Time spent loading a missing entry from upstream"
    );
}

/// Recorder de metricas de un cache.
///
/// Every series carries a `cache` label (`ids` or `items`). Hits and misses
/// are also kept in local counters so tests can read them back without a
/// global recorder.
#[derive(Debug, Clone)]
pub struct CacheMetrics {
    cache: &'static str,
    hits: Arc<AtomicU64>,
    misses: Arc<AtomicU64>,
}

impl CacheMetrics {
    pub fn new(cache: &'static str) -> Self {
        Self {
            cache,
            hits: Arc::new(AtomicU64::new(0)),
            misses: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Name used as the `cache` label.
    pub fn cache(&self) -> &'static str {
        self.cache
    }

    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
        counter!("hn_cache_hits_total", "cache" => self.cache).increment(1);
    }

    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
        counter!("hn_cache_misses_total", "cache" => self.cache).increment(1);
    }

    pub fn record_tombstone(&self) {
        counter!("hn_cache_tombstones_total", "cache" => self.cache).increment(1);
    }

    pub fn record_eviction(&self, reason: &'static str) {
        counter!(
            "hn_cache_evictions_total",
            "cache" => self.cache,
            "reason" => reason
        )
        .increment(1);
    }

    pub fn update_entry_count(&self, count: u64) {
        gauge!("hn_cache_entries", "cache" => self.cache).set(count as f64);
    }

    /// Records how long an upstream load took on a miss.
    pub fn record_load_duration(&self, duration: Duration) {
        histogram!("hn_cache_load_seconds", "cache" => self.cache).record(duration.as_secs_f64());
    }

    /// Calcula hit rate (para logging/debugging)
    pub fn hit_rate(&self) -> f64 {
        let hits = self.hits.load(Ordering::Relaxed) as f64;
        let misses = self.misses.load(Ordering::Relaxed) as f64;
        let total = hits + misses;
        if total == 0.0 { 0.0 } else { hits / total }
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }
}
