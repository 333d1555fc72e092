//! Common type definitions for hn-feed.

use serde::{Deserialize, Serialize};

/// Upstream item identifier.
pub type ItemId = u64;

/// A story resolved from the upstream index.
///
/// Items are immutable once constructed. A missing title or URL is a
/// legitimate value, not an error: Ask HN posts carry no URL, and the
/// upstream occasionally omits titles.
///
/// Serializes with the upstream field names (`by`, `time`).
///
/// # Example
///
/// ```
/// use hn_core::Item;
///
/// let item = Item::new(42, Some("Show HN: A tiny cache".into()), None, "pg", 1_700_000_000);
/// assert!(item.title_contains("show hn"));
/// assert!(item.url.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier
    pub id: ItemId,
    /// Title, if the upstream has one
    pub title: Option<String>,
    /// Link target; never an empty or whitespace-only string
    pub url: Option<String>,
    /// Author username (empty when unknown)
    #[serde(rename = "by")]
    pub author: String,
    /// Creation time in unix seconds
    #[serde(rename = "time")]
    pub created_at: i64,
}

impl Item {
    /// Creates a new item. A blank URL is normalized to `None`.
    pub fn new(
        id: ItemId,
        title: Option<String>,
        url: Option<String>,
        author: impl Into<String>,
        created_at: i64,
    ) -> Self {
        Self {
            id,
            title,
            url: url.filter(|u| !u.trim().is_empty()),
            author: author.into(),
            created_at,
        }
    }

    /// Case-insensitive substring match against the title.
    ///
    /// Items without a title never match.
    pub fn title_contains(&self, needle: &str) -> bool {
        match &self.title {
            Some(title) => title.to_lowercase().contains(&needle.to_lowercase()),
            None => false,
        }
    }
}

/// One page of results.
///
/// `total` counts against the ID universe (or the search matches) and is not
/// required to equal `items.len()`: IDs that resolve to nothing are dropped
/// from `items` but still counted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagedResult<T> {
    /// Size of the universe the page was cut from
    pub total: usize,
    /// Items on this page, in order
    pub items: Vec<T>,
}

impl<T> PagedResult<T> {
    /// Creates a new page.
    pub fn new(total: usize, items: Vec<T>) -> Self {
        Self { total, items }
    }

    /// Returns an empty page with the given total.
    pub fn empty(total: usize) -> Self {
        Self {
            total,
            items: Vec::new(),
        }
    }
}
