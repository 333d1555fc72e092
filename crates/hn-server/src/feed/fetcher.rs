//! Concurrency-bounded, order-preserving fan-out over the item cache.

use std::sync::Arc;
use std::time::Instant;

use hn_core::{HnError, Item, ItemId, RequestContext, Result};
use tokio::task::JoinSet;
use tracing::debug;

use super::limiter::AdmissionLimiter;
use crate::cache::ItemCache;
use crate::metrics::fetch::record_batch;

/// Resolves batches of IDs through the [`ItemCache`], at most
/// `limiter.capacity()` loads at a time process-wide.
#[derive(Clone)]
pub struct BoundedFetcher {
    items: Arc<ItemCache>,
    limiter: AdmissionLimiter,
}

impl BoundedFetcher {
    pub fn new(items: Arc<ItemCache>, limiter: AdmissionLimiter) -> Self {
        Self { items, limiter }
    }

    pub fn limiter(&self) -> &AdmissionLimiter {
        &self.limiter
    }

    /// Resolves `ids` to items in input order, dropping IDs that resolve to
    /// nothing.
    ///
    /// Either every ID resolves or the call fails: the first error, or a
    /// cancellation of `ctx`, aborts the tasks still running or queued.
    pub async fn fetch_many(&self, ids: &[ItemId], ctx: &RequestContext) -> Result<Vec<Item>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let start = Instant::now();
        let result = self.resolve_all(ids, ctx).await;

        let outcome = match &result {
            Ok(_) => "ok",
            Err(HnError::Cancelled) => "cancelled",
            Err(_) => "error",
        };
        record_batch(ids.len(), outcome, start.elapsed());

        if let Ok(items) = &result {
            debug!(
                requested = ids.len(),
                resolved = items.len(),
                elapsed_ms = start.elapsed().as_millis() as u64,
                "Fetched item batch"
            );
        }

        result
    }

    async fn resolve_all(&self, ids: &[ItemId], ctx: &RequestContext) -> Result<Vec<Item>> {
        let mut tasks = JoinSet::new();

        for (index, &id) in ids.iter().enumerate() {
            let items = Arc::clone(&self.items);
            let limiter = self.limiter.clone();
            let ctx = ctx.clone();

            tasks.spawn(async move {
                let _permit = limiter.acquire(&ctx).await?;
                let item = items.get_item(id, &ctx).await?;
                Ok::<_, HnError>((index, item))
            });
        }

        let mut slots: Vec<Option<Item>> = vec![None; ids.len()];

        // Returning early drops `tasks`, which aborts whatever is left.
        loop {
            let joined = ctx
                .run(async { Ok::<_, HnError>(tasks.join_next().await) })
                .await?;
            let Some(joined) = joined else {
                break;
            };

            match joined {
                Ok(Ok((index, item))) => slots[index] = item,
                Ok(Err(e)) => {
                    tasks.abort_all();
                    debug!(error = %e, "Item batch failed");
                    return Err(e);
                },
                Err(join_error) => {
                    tasks.abort_all();
                    return Err(HnError::internal(format!(
                        "item task failed: {}",
                        join_error
                    )));
                },
            }
        }

        Ok(slots.into_iter().flatten().collect())
    }
}
