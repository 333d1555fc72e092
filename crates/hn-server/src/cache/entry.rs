//! Cached values with their own time-to-live.

use std::sync::Arc;
use std::time::{Duration, Instant};

use hn_core::{Item, ItemId};
use moka::Expiry;

/// A cached value together with the TTL it was stored with.
///
/// The TTL is chosen per entry (jittered, or outcome dependent for items),
/// so expiry is driven by [`EntryExpiry`] rather than a cache-wide setting.
#[derive(Debug, Clone)]
pub struct Expiring<V> {
    value: V,
    ttl: Duration,
    cached_at: Instant,
}

impl<V> Expiring<V> {
    pub fn new(value: V, ttl: Duration) -> Self {
        Self {
            value,
            ttl,
            cached_at: Instant::now(),
        }
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn cached_at(&self) -> Instant {
        self.cached_at
    }

    /// Instant at which the entry stops being served.
    pub fn expires_at(&self) -> Instant {
        self.cached_at + self.ttl
    }
}

/// Snapshot of the newest-ID list, newest first.
pub type IdListEntry = Expiring<Arc<[ItemId]>>;

/// Resolution of a single ID.
pub type ItemEntry = Expiring<CachedItem>;

/// What an ID resolved to.
///
/// `Tombstone` records that the ID resolved to nothing (not found, not a
/// story, dead or deleted). It is a cached answer, distinct from a miss.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CachedItem {
    Valid(Item),
    Tombstone,
}

impl CachedItem {
    pub fn is_tombstone(&self) -> bool {
        matches!(self, CachedItem::Tombstone)
    }

    pub fn item(&self) -> Option<&Item> {
        match self {
            CachedItem::Valid(item) => Some(item),
            CachedItem::Tombstone => None,
        }
    }

    pub fn into_item(self) -> Option<Item> {
        match self {
            CachedItem::Valid(item) => Some(item),
            CachedItem::Tombstone => None,
        }
    }
}

impl From<Option<Item>> for CachedItem {
    fn from(resolved: Option<Item>) -> Self {
        match resolved {
            Some(item) => CachedItem::Valid(item),
            None => CachedItem::Tombstone,
        }
    }
}

/// Moka expiry policy that reads each entry's own TTL.
///
/// Reads do not extend the lifetime; a replaced entry starts over with the
/// TTL of the new value.
#[derive(Debug, Clone, Copy, Default)]
pub struct EntryExpiry;

impl<K, V> Expiry<K, Arc<Expiring<V>>> for EntryExpiry {
    fn expire_after_create(
        &self,
        _key: &K,
        value: &Arc<Expiring<V>>,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &K,
        value: &Arc<Expiring<V>>,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}
