//! hn-core - Domain types and traits
//!
//! This crate provides the foundational types shared by the hn-feed crates:
//! the [`Item`] and [`PagedResult`] models, the error taxonomy, the
//! [`ItemSource`] abstraction over the upstream index and the
//! [`RequestContext`] used to carry cancellation through a request.

pub mod context;
pub mod error;
pub mod source;
pub mod types;

pub use context::RequestContext;
pub use error::{HnError, Result, SourceError};
pub use source::ItemSource;
pub use types::{Item, ItemId, PagedResult};
