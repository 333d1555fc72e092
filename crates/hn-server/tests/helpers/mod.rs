//! Test helpers para hn-server.

#![allow(dead_code, unused_imports)]

pub mod assertions;
pub mod client;
pub mod source;

use std::sync::Arc;

use hn_core::ItemSource;
use hn_server::{EngineConfig, FeedEngine, cache::FixedJitter};

pub use assertions::*;
pub use client::{TEST_ORIGIN, TestClient, TestResponse, client_for, router_for};
pub use source::{FakeSource, story};

/// Engine over `source` with pinned TTLs and the given limiter capacity.
pub fn engine(source: Arc<FakeSource>, max_concurrency: usize) -> FeedEngine {
    let source: Arc<dyn ItemSource> = source;
    FeedEngine::with_jitter(
        source,
        EngineConfig {
            max_concurrency,
            ..EngineConfig::default()
        },
        Arc::new(FixedJitter),
    )
}
