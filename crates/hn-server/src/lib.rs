//! # hn-server
//!
//! Aggregation engine and HTTP server for hn-feed.
//!
//! - [`cache`]: moka caches for the newest-ID list and for item
//!   resolutions, with per-entry TTLs and tombstones
//! - [`feed`]: the admission limiter, the order-preserving fan-out and the
//!   [`StoryAggregator`] that builds pages and search results
//! - The axum shim: [`create_router`], handlers, middleware, settings
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use hn_client::{HackerNewsClient, HackerNewsConfig};
//! use hn_core::RequestContext;
//! use hn_server::{EngineConfig, FeedEngine};
//!
//! let client = HackerNewsClient::new(HackerNewsConfig::default())?;
//! let engine = FeedEngine::new(Arc::new(client), EngineConfig::default());
//!
//! let page = engine
//!     .aggregator()
//!     .get_newest(0, 20, Some("rust"), &RequestContext::new())
//!     .await?;
//! ```

pub mod cache;
pub mod error;
pub mod extractors;
pub mod feed;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod server;
pub mod settings;
pub mod state;

pub use error::AppError;
pub use feed::{AdmissionLimiter, BoundedFetcher, EngineConfig, FeedEngine, StoryAggregator};
pub use server::{create_router, run_server};
pub use settings::{Settings, SettingsError};
pub use state::AppState;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
