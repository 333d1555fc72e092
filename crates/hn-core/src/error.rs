//! Error types for hn-feed.
//!
//! Two layers of errors exist:
//!
//! - [`SourceError`] describes a transport or protocol failure reported by an
//!   [`ItemSource`](crate::ItemSource). A resolved absence (deleted item, wrong
//!   type, 404) is never a `SourceError`.
//! - [`HnError`] is what the aggregation engine returns to its caller. It keeps
//!   validation, upstream and cancellation failures distinguishable so the
//!   caller can map them to its own transport format.
//!
//! Both types are `Clone`: a single upstream failure observed while loading a
//! shared cache entry is handed to every request waiting on that entry.
//!
//! # Example
//!
//! ```
//! use hn_core::{HnError, Result};
//!
//! fn check_limit(limit: i64) -> Result<usize> {
//!     if !(1..=100).contains(&limit) {
//!         return Err(HnError::validation("limit", "Limit must be between 1 and 100"));
//!     }
//!     Ok(limit as usize)
//! }
//!
//! assert!(check_limit(0).unwrap_err().is_validation());
//! assert_eq!(check_limit(20).unwrap(), 20);
//! ```

use thiserror::Error;

/// Failure reported by an item source while talking to the upstream index.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    /// The request could not be sent or the connection failed.
    #[error("http error: {message}")]
    Http {
        /// Description of the failure
        message: String,
    },

    /// The upstream answered with an unexpected status code.
    #[error("unexpected status {status} from {url}")]
    Status {
        /// HTTP status code
        status: u16,
        /// URL that was requested
        url: String,
    },

    /// The response body could not be decoded.
    #[error("decode error: {message}")]
    Decode {
        /// Description of the decode failure
        message: String,
    },

    /// The request did not complete in time.
    #[error("request timed out after {seconds}s")]
    Timeout {
        /// Configured timeout in seconds
        seconds: u64,
    },

    /// The source is not available (misconfigured or shut down).
    #[error("source unavailable: {reason}")]
    Unavailable {
        /// Why the source is unavailable
        reason: String,
    },
}

impl SourceError {
    /// Creates an Http error.
    pub fn http(message: impl Into<String>) -> Self {
        Self::Http {
            message: message.into(),
        }
    }

    /// Creates a Status error.
    pub fn status(status: u16, url: impl Into<String>) -> Self {
        Self::Status {
            status,
            url: url.into(),
        }
    }

    /// Creates a Decode error.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Creates an Unavailable error.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }

    /// Returns true if this is a transient error that might succeed on retry.
    ///
    /// Request timeouts (408), rate limiting (429) and server errors (5xx)
    /// are transient; every other status is not.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Http { .. } | Self::Timeout { .. } | Self::Unavailable { .. } => true,
            Self::Status { status, .. } => *status == 408 || *status == 429 || *status >= 500,
            Self::Decode { .. } => false,
        }
    }
}

/// Main error type returned by the aggregation engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HnError {
    /// A request parameter is out of range. Detected before any I/O.
    #[error("Validation error for field '{field}': {message}")]
    Validation {
        /// Parameter that failed validation
        field: String,
        /// Description of the validation failure
        message: String,
    },

    /// The item source failed while listing IDs or resolving an item.
    #[error("Upstream error: {0}")]
    Upstream(#[from] SourceError),

    /// The request was cancelled or its deadline elapsed.
    #[error("Request was cancelled")]
    Cancelled,

    /// Generic internal error (a fan-out task panicked, the limiter was closed...).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl HnError {
    // ============================================
    // Convenience constructors
    // ============================================

    /// Creates a Validation error.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Creates an Internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================
    // Query methods
    // ============================================

    /// Returns true if this is a client-input fault.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Returns true if the item source failed.
    pub fn is_upstream(&self) -> bool {
        matches!(self, Self::Upstream(_))
    }

    /// Returns true if the request was cancelled or timed out.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

/// Type alias for Results with HnError.
pub type Result<T> = std::result::Result<T, HnError>;
