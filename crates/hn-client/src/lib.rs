//! # hn-client
//!
//! Hacker News backend for hn-feed.
//!
//! This crate implements [`hn_core::ItemSource`] over the public Hacker News
//! Firebase API. It owns everything that is specific to that upstream:
//!
//! - The wire model of `/v0/item/{id}.json` and its domain filtering
//!   (non-story, dead and deleted items resolve to nothing)
//! - Base URL normalization, request timeout and user agent
//! - Retry with exponential backoff and jitter for transient failures
//!
//! ## Example
//!
//! ```ignore
//! use hn_client::{HackerNewsClient, HackerNewsConfig};
//! use hn_core::ItemSource;
//!
//! let config = HackerNewsConfig::builder()
//!     .base_url("https://hacker-news.firebaseio.com")
//!     .build()?;
//!
//! let client = HackerNewsClient::new(config)?;
//! let ids = client.list_newest_ids().await?;
//! ```

pub mod client;
pub mod config;
pub mod retry;
mod wire;

// Re-exports
pub use client::HackerNewsClient;
pub use config::{HackerNewsConfig, HackerNewsConfigBuilder};
pub use retry::RetryPolicy;

// Re-export hn_core for consumers
pub use hn_core;
