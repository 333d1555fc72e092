//! Application state.

use std::time::Duration;

use hn_core::RequestContext;

use crate::feed::{FeedEngine, StoryAggregator};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    aggregator: StoryAggregator,
    request_timeout: Duration,
}

impl AppState {
    pub fn new(aggregator: StoryAggregator, request_timeout: Duration) -> Self {
        Self {
            aggregator,
            request_timeout,
        }
    }

    pub fn from_engine(engine: &FeedEngine, request_timeout: Duration) -> Self {
        Self::new(engine.aggregator(), request_timeout)
    }

    pub fn aggregator(&self) -> &StoryAggregator {
        &self.aggregator
    }

    /// A fresh context for one request, bounded by the request timeout.
    pub fn request_context(&self) -> RequestContext {
        RequestContext::new().with_timeout(self.request_timeout)
    }
}
