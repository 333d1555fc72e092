//! Item source trait definition.

use async_trait::async_trait;

use crate::error::SourceError;
use crate::types::{Item, ItemId};

/// A read-only, rate-limited upstream index of items.
///
/// This trait abstracts over the upstream so the aggregation engine can be
/// driven by the Hacker News HTTP client in production and by in-memory
/// fakes in tests.
///
/// Implementations do not take a cancellation argument: callers cancel a
/// lookup by dropping its future (see [`RequestContext::run`]).
///
/// [`RequestContext::run`]: crate::RequestContext::run
///
/// # Implementors
///
/// - `HackerNewsClient` (hn-client) - Fetches from the Hacker News Firebase API
#[async_trait]
pub trait ItemSource: Send + Sync {
    /// Returns the full list of newest IDs, newest first.
    ///
    /// # Errors
    ///
    /// Returns a [`SourceError`] on network or protocol failure.
    async fn list_newest_ids(&self) -> Result<Vec<ItemId>, SourceError>;

    /// Resolves a single item.
    ///
    /// Returns `Ok(None)` when the item does not exist or is filtered out
    /// (not a story, dead, deleted). Only transport and protocol failures are
    /// reported as errors.
    async fn get_item(&self, id: ItemId) -> Result<Option<Item>, SourceError>;

    /// Returns the name of this source, used for logging.
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct MockSource {
        items: HashMap<ItemId, Item>,
    }

    #[async_trait]
    impl ItemSource for MockSource {
        async fn list_newest_ids(&self) -> Result<Vec<ItemId>, SourceError> {
            let mut ids: Vec<ItemId> = self.items.keys().copied().collect();
            ids.sort_unstable_by(|a, b| b.cmp(a));
            Ok(ids)
        }

        async fn get_item(&self, id: ItemId) -> Result<Option<Item>, SourceError> {
            Ok(self.items.get(&id).cloned())
        }

        fn name(&self) -> &str {
            "mock"
        }
    }

    #[tokio::test]
    async fn test_mock_source() {
        let items = (1..=3)
            .map(|id| (id, Item::new(id, None, None, "a", 0)))
            .collect();
        let source = MockSource { items };

        assert_eq!(source.list_newest_ids().await.unwrap(), vec![3, 2, 1]);
        assert!(source.get_item(2).await.unwrap().is_some());
        assert!(source.get_item(9).await.unwrap().is_none());
        assert_eq!(source.name(), "mock");
    }

    #[tokio::test]
    async fn test_usable_as_trait_object() {
        let source: Box<dyn ItemSource> = Box::new(MockSource {
            items: HashMap::new(),
        });

        assert!(source.list_newest_ids().await.unwrap().is_empty());
    }
}
