//! TTL policy for the ID and item caches.

use std::time::Duration;

use super::entry::CachedItem;
use super::jitter::Jitter;

/// Inclusive TTL range. `min == max` gives a flat TTL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TtlRange {
    pub min: Duration,
    pub max: Duration,
}

impl TtlRange {
    pub const fn new(min: Duration, max: Duration) -> Self {
        Self { min, max }
    }

    pub const fn fixed(ttl: Duration) -> Self {
        Self { min: ttl, max: ttl }
    }

    pub fn pick(&self, jitter: &dyn Jitter) -> Duration {
        jitter.ttl_between(self.min, self.max)
    }

    pub fn contains(&self, ttl: Duration) -> bool {
        ttl >= self.min && ttl <= self.max
    }

    pub fn is_valid(&self) -> bool {
        self.min <= self.max && !self.min.is_zero()
    }
}

/// TTLs for every kind of cached entry.
///
/// Defaults: the ID list lives 60..=120s, a resolved story 5..=10 min and a
/// tombstone a flat 60s so an item that becomes valid is picked up quickly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TtlPolicy {
    pub ids: TtlRange,
    pub item: TtlRange,
    pub tombstone: TtlRange,
}

impl TtlPolicy {
    /// TTL for an item resolution, depending on its outcome.
    pub fn for_item(&self, resolved: &CachedItem, jitter: &dyn Jitter) -> Duration {
        match resolved {
            CachedItem::Valid(_) => self.item.pick(jitter),
            CachedItem::Tombstone => self.tombstone.pick(jitter),
        }
    }
}

impl Default for TtlPolicy {
    fn default() -> Self {
        Self {
            ids: TtlRange::new(Duration::from_secs(60), Duration::from_secs(120)),
            item: TtlRange::new(Duration::from_secs(300), Duration::from_secs(600)),
            tombstone: TtlRange::fixed(Duration::from_secs(60)),
        }
    }
}
