#![allow(dead_code)]
use hn_core::Item;

/// Helper to create a titled story with a link.
pub fn story(id: u64, title: &str) -> Item {
    Item::new(
        id,
        Some(title.to_string()),
        Some(format!("https://example.com/{}", id)),
        "tester",
        1_700_000_000 + id as i64,
    )
}

/// Returns a JSON fixture shaped like a page returned to HTTP clients.
pub fn page_json() -> &'static str {
    r#"{
        "total": 2,
        "items": [
            { "id": 2, "title": "Second", "url": null, "by": "bob", "time": 1700000002 },
            { "id": 1, "title": null, "url": "https://example.com", "by": "", "time": 1700000001 }
        ]
    }"#
}
