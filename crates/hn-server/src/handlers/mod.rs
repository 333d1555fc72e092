//! HTTP handlers.

pub mod health;
pub mod metrics;
pub mod stories;

pub use health::health_check;
pub use metrics::metrics_handler;
pub use stories::get_newest_stories;
