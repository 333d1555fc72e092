//! Paged, optionally title-filtered views over the newest stories.

use std::sync::Arc;

use hn_core::{HnError, Item, ItemId, PagedResult, RequestContext, Result};
use tracing::{debug, instrument};

use super::fetcher::BoundedFetcher;
use crate::cache::IdCache;

/// Number of newest IDs a search scans.
pub const DEFAULT_SEARCH_WINDOW: usize = 500;

/// Largest page a caller may ask for.
pub const MAX_LIMIT: i64 = 100;

/// Builds result pages from the ID cache and the fetcher.
///
/// Stateless between calls; everything shared lives in the caches and the
/// limiter behind [`BoundedFetcher`].
#[derive(Clone)]
pub struct StoryAggregator {
    ids: Arc<IdCache>,
    fetcher: BoundedFetcher,
    search_window: usize,
}

impl StoryAggregator {
    pub fn new(ids: Arc<IdCache>, fetcher: BoundedFetcher) -> Self {
        Self {
            ids,
            fetcher,
            search_window: DEFAULT_SEARCH_WINDOW,
        }
    }

    pub fn with_search_window(mut self, search_window: usize) -> Self {
        self.search_window = search_window;
        self
    }

    pub fn search_window(&self) -> usize {
        self.search_window
    }

    /// Returns one page of the newest stories.
    ///
    /// Without a search term the page is `ids[offset..offset + limit]` and
    /// `total` is the length of the whole ID list. With one, the first
    /// `search_window` IDs are resolved and filtered by title
    /// (case-insensitive substring), `total` counts the matches and the page
    /// is sliced from them.
    ///
    /// `offset` and `limit` are checked before any I/O.
    #[instrument(skip(self, ctx))]
    pub async fn get_newest(
        &self,
        offset: i64,
        limit: i64,
        search: Option<&str>,
        ctx: &RequestContext,
    ) -> Result<PagedResult<Item>> {
        let (offset, limit) = validate_page(offset, limit)?;
        let all_ids = self.ids.get_newest_ids(ctx).await?;

        match normalize_search(search) {
            None => self.page_without_search(&all_ids, offset, limit, ctx).await,
            Some(term) => self.page_with_search(&all_ids, offset, limit, term, ctx).await,
        }
    }

    async fn page_without_search(
        &self,
        all_ids: &[ItemId],
        offset: usize,
        limit: usize,
        ctx: &RequestContext,
    ) -> Result<PagedResult<Item>> {
        let page_ids = page_of(all_ids, offset, limit);
        let items = self.fetcher.fetch_many(page_ids, ctx).await?;

        debug!(
            total = all_ids.len(),
            page_ids = page_ids.len(),
            returned = items.len(),
            "Built page"
        );
        Ok(PagedResult::new(all_ids.len(), items))
    }

    async fn page_with_search(
        &self,
        all_ids: &[ItemId],
        offset: usize,
        limit: usize,
        term: &str,
        ctx: &RequestContext,
    ) -> Result<PagedResult<Item>> {
        let window = &all_ids[..self.search_window.min(all_ids.len())];
        let window_items = self.fetcher.fetch_many(window, ctx).await?;

        let matches: Vec<Item> = window_items
            .into_iter()
            .filter(|item| item.title_contains(term))
            .collect();
        let total = matches.len();
        let page = page_of(&matches, offset, limit).to_vec();

        debug!(
            window = window.len(),
            matches = total,
            returned = page.len(),
            "Built search page"
        );
        Ok(PagedResult::new(total, page))
    }
}

/// Checks and converts raw paging parameters.
pub fn validate_page(offset: i64, limit: i64) -> Result<(usize, usize)> {
    if offset < 0 {
        return Err(HnError::validation("offset", "Offset must be >= 0"));
    }
    if !(1..=MAX_LIMIT).contains(&limit) {
        return Err(HnError::validation(
            "limit",
            format!("Limit must be between 1 and {}", MAX_LIMIT),
        ));
    }

    let offset = usize::try_from(offset).unwrap_or(usize::MAX);
    Ok((offset, limit as usize))
}

/// Trims the term; a blank term means no search.
fn normalize_search(search: Option<&str>) -> Option<&str> {
    search.map(str::trim).filter(|term| !term.is_empty())
}

/// `slice[offset..offset + limit]`, clamped to the slice.
fn page_of<T>(slice: &[T], offset: usize, limit: usize) -> &[T] {
    let start = offset.min(slice.len());
    let end = start.saturating_add(limit).min(slice.len());
    &slice[start..end]
}
