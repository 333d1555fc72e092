//! Process-wide admission limiter for upstream item loads.

use std::sync::Arc;
use std::time::Instant;

use hn_core::{HnError, RequestContext, Result};
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

use crate::metrics::fetch::{record_admission, record_release};

/// Default number of simultaneous item loads.
pub const DEFAULT_MAX_CONCURRENCY: usize = 10;

/// Caps how many item loads run at once across every request.
///
/// Clones share the same permits. A capacity of zero is allowed and admits
/// nothing, which is useful to observe cancellation of queued work.
#[derive(Debug, Clone)]
pub struct AdmissionLimiter {
    semaphore: Arc<Semaphore>,
    capacity: usize,
}

/// RAII permit. Dropping it, on any path, returns the slot.
#[derive(Debug)]
pub struct AdmissionPermit {
    _permit: OwnedSemaphorePermit,
}

impl Drop for AdmissionPermit {
    fn drop(&mut self) {
        record_release();
    }
}

impl AdmissionLimiter {
    pub fn new(capacity: usize) -> Self {
        Self {
            semaphore: Arc::new(Semaphore::new(capacity)),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Permits currently free.
    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }

    /// Waits for a permit, or fails with `Cancelled` if `ctx` ends first.
    pub async fn acquire(&self, ctx: &RequestContext) -> Result<AdmissionPermit> {
        let start = Instant::now();
        let semaphore = Arc::clone(&self.semaphore);

        let permit = ctx
            .run(async move {
                semaphore
                    .acquire_owned()
                    .await
                    .map_err(|_| HnError::internal("admission limiter closed"))
            })
            .await?;

        record_admission(start.elapsed());
        Ok(AdmissionPermit { _permit: permit })
    }
}

impl Default for AdmissionLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CONCURRENCY)
    }
}
