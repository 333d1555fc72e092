//! In-memory item source que cuenta llamadas.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use hn_core::{Item, ItemId, ItemSource, SourceError};
use parking_lot::Mutex;

/// Fake upstream.
///
/// Every listed ID resolves to `Story {id}` unless marked absent, retitled or
/// failing. IDs not registered at all resolve to nothing. Each item call
/// sleeps for `delay` (tokio time, so paused-clock tests are exact).
#[derive(Debug, Default)]
pub struct FakeSource {
    ids: Vec<ItemId>,
    items: HashMap<ItemId, Item>,
    failing: HashSet<ItemId>,
    fail_list: bool,
    delay: Duration,

    list_calls: AtomicUsize,
    item_calls: Mutex<HashMap<ItemId, usize>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

pub fn story(id: ItemId, title: &str) -> Item {
    Item::new(
        id,
        Some(title.to_string()),
        Some(format!("https://example.com/{}", id)),
        "tester",
        1_700_000_000 + id as i64,
    )
}

impl FakeSource {
    /// Lists `ids`, each resolving to `Story {id}`.
    pub fn with_stories(ids: impl IntoIterator<Item = ItemId>) -> Self {
        let ids: Vec<ItemId> = ids.into_iter().collect();
        let items = ids
            .iter()
            .map(|&id| (id, story(id, &format!("Story {}", id))))
            .collect();

        Self {
            ids,
            items,
            ..Self::default()
        }
    }

    /// Replaces the listed IDs without registering items for the new ones.
    pub fn listing(mut self, ids: impl IntoIterator<Item = ItemId>) -> Self {
        self.ids = ids.into_iter().collect();
        self
    }

    pub fn absent(mut self, id: ItemId) -> Self {
        self.items.remove(&id);
        self
    }

    pub fn titled(mut self, id: ItemId, title: &str) -> Self {
        self.items.insert(id, story(id, title));
        self
    }

    pub fn untitled(mut self, id: ItemId) -> Self {
        self.items
            .insert(id, Item::new(id, None, None, "tester", 1_700_000_000));
        self
    }

    pub fn failing(mut self, id: ItemId) -> Self {
        self.failing.insert(id);
        self
    }

    pub fn failing_list(mut self) -> Self {
        self.fail_list = true;
        self
    }

    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn item_calls(&self, id: ItemId) -> usize {
        self.item_calls.lock().get(&id).copied().unwrap_or(0)
    }

    pub fn total_item_calls(&self) -> usize {
        self.item_calls.lock().values().sum()
    }

    /// Distinct IDs that reached the source, sorted.
    pub fn fetched_ids(&self) -> Vec<ItemId> {
        let mut ids: Vec<_> = self.item_calls.lock().keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Highest number of simultaneous item calls seen.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

/// Tracks one in-flight call; decrements on drop so aborted calls count too.
struct InFlight<'a>(&'a FakeSource);

impl<'a> InFlight<'a> {
    fn enter(source: &'a FakeSource) -> Self {
        let now = source.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        source.max_in_flight.fetch_max(now, Ordering::SeqCst);
        Self(source)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl ItemSource for FakeSource {
    async fn list_newest_ids(&self) -> Result<Vec<ItemId>, SourceError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_list {
            return Err(SourceError::status(503, "fake://newstories.json"));
        }
        Ok(self.ids.clone())
    }

    async fn get_item(&self, id: ItemId) -> Result<Option<Item>, SourceError> {
        *self.item_calls.lock().entry(id).or_default() += 1;
        let _guard = InFlight::enter(self);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        if self.failing.contains(&id) {
            return Err(SourceError::http(format!("connection reset fetching {}", id)));
        }
        Ok(self.items.get(&id).cloned())
    }

    fn name(&self) -> &str {
        "fake"
    }
}
