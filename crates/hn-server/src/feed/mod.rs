//! Aggregation engine.
//!
//! [`StoryAggregator`] validates the request, reads the ID list from the
//! [`IdCache`](crate::cache::IdCache) and resolves the page or the search
//! window through [`BoundedFetcher`], which fans out over the
//! [`ItemCache`](crate::cache::ItemCache) under the shared
//! [`AdmissionLimiter`].

pub mod aggregator;
pub mod engine;
pub mod fetcher;
pub mod limiter;

pub use aggregator::{DEFAULT_SEARCH_WINDOW, MAX_LIMIT, StoryAggregator, validate_page};
pub use engine::{EngineConfig, FeedEngine};
pub use fetcher::BoundedFetcher;
pub use limiter::{AdmissionLimiter, AdmissionPermit, DEFAULT_MAX_CONCURRENCY};
