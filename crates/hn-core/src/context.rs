//! Request-scoped cancellation.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::Instant;

use crate::error::{HnError, Result};

/// Cancellation signal and optional deadline for one request.
///
/// Clones share the same signal: cancelling any clone cancels them all. The
/// context is threaded through every suspension point of an aggregation
/// (ID fetch, limiter admission, item fetch) and [`run`](Self::run) turns a
/// cancellation or an elapsed deadline into [`HnError::Cancelled`].
///
/// # Example
///
/// ```
/// use hn_core::{HnError, RequestContext};
///
/// # #[tokio::main]
/// # async fn main() {
/// let ctx = RequestContext::new();
/// ctx.cancel();
///
/// let result = ctx.run(async { Ok::<_, HnError>(1) }).await;
/// assert!(matches!(result, Err(HnError::Cancelled)));
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct RequestContext {
    signal: Arc<watch::Sender<bool>>,
    deadline: Option<Instant>,
}

impl RequestContext {
    /// Creates a context that is never cancelled unless [`cancel`](Self::cancel) is called.
    pub fn new() -> Self {
        let (signal, _) = watch::channel(false);
        Self {
            signal: Arc::new(signal),
            deadline: None,
        }
    }

    /// Returns this context with a deadline `timeout` from now.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Returns this context with the given deadline. An earlier existing
    /// deadline is kept.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(match self.deadline {
            Some(current) => current.min(deadline),
            None => deadline,
        });
        self
    }

    /// Returns the deadline, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Signals cancellation to every clone of this context.
    pub fn cancel(&self) {
        self.signal.send_replace(true);
    }

    /// Returns true if cancelled or past the deadline.
    pub fn is_cancelled(&self) -> bool {
        *self.signal.borrow() || self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// Completes once the context is cancelled or the deadline elapses.
    pub async fn cancelled(&self) {
        let mut rx = self.signal.subscribe();
        let signalled = async move {
            // The sender lives as long as `self`, so the channel cannot close here.
            if rx.wait_for(|cancelled| *cancelled).await.is_err() {
                std::future::pending::<()>().await;
            }
        };

        match self.deadline {
            Some(deadline) => {
                tokio::select! {
                    _ = signalled => {},
                    _ = tokio::time::sleep_until(deadline) => {},
                }
            },
            None => signalled.await,
        }
    }

    /// Runs `future` until it completes or the context is cancelled.
    ///
    /// On cancellation the future is dropped, which aborts whatever it was
    /// awaiting (an HTTP request, a semaphore wait, a join).
    pub async fn run<F, T, E>(&self, future: F) -> Result<T>
    where
        F: Future<Output = std::result::Result<T, E>>,
        E: Into<HnError>,
    {
        if self.is_cancelled() {
            return Err(HnError::Cancelled);
        }

        tokio::select! {
            biased;
            _ = self.cancelled() => Err(HnError::Cancelled),
            result = future => result.map_err(Into::into),
        }
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}
