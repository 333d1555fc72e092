//! Cache layer for the feed engine.
//!
//! Two moka caches sit in front of the upstream: a single-entry cache of the
//! newest-ID list and a per-ID cache of item resolutions. Entries carry their
//! own TTL ([`Expiring`]), picked from a [`TtlPolicy`] through an injected
//! [`Jitter`].

pub mod entry;
pub mod id_cache;
pub mod item_cache;
pub mod jitter;
pub mod policy;

use moka::notification::RemovalCause;

pub use entry::{CachedItem, EntryExpiry, Expiring, IdListEntry, ItemEntry};
pub use id_cache::IdCache;
pub use item_cache::ItemCache;
pub use jitter::{FixedJitter, Jitter, RandomJitter, SeededJitter};
pub use policy::{TtlPolicy, TtlRange};

/// Label used on `hn_cache_evictions_total`.
pub(crate) fn removal_reason(cause: RemovalCause) -> &'static str {
    match cause {
        RemovalCause::Expired => "ttl",
        RemovalCause::Size => "capacity",
        RemovalCause::Explicit => "manual",
        RemovalCause::Replaced => "replaced",
    }
}
