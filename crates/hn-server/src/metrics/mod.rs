//! Prometheus metrics for the feed server.

pub mod cache;
pub mod fetch;
pub mod http;
pub mod setup;

pub use cache::CacheMetrics;
pub use setup::{detached_handle, init_metrics};
