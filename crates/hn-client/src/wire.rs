//! Wire model of `/v0/item/{id}.json`.

use hn_core::{Item, ItemId};
use serde::Deserialize;

/// An item as returned by the upstream. Every field except `id` may be missing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct HackerNewsItem {
    pub id: ItemId,
    pub title: Option<String>,
    pub url: Option<String>,
    pub by: Option<String>,
    pub time: i64,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub dead: Option<bool>,
    pub deleted: Option<bool>,
}

impl HackerNewsItem {
    /// Returns why this item is not a usable story, or `None` if it is.
    pub fn rejection(&self) -> Option<&'static str> {
        if self.kind.as_deref() != Some("story") {
            Some("not a story")
        } else if self.dead == Some(true) {
            Some("dead")
        } else if self.deleted == Some(true) {
            Some("deleted")
        } else {
            None
        }
    }

    /// Converts into a domain item, or `None` if the item is filtered out.
    pub fn into_story(self) -> Option<Item> {
        if self.rejection().is_some() {
            return None;
        }

        Some(Item::new(
            self.id,
            self.title,
            self.url,
            self.by.unwrap_or_default(),
            self.time,
        ))
    }
}
