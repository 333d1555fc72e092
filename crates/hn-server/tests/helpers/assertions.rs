//! Custom assertions para tests.

use hn_core::{Item, ItemId, PagedResult};
use serde_json::Value;

/// Verifica que una respuesta JSON tenga la forma de una pagina.
pub fn assert_page_schema(json: &Value) {
    let obj = json.as_object().expect("Response should be a JSON object");

    assert!(obj["total"].is_u64(), "'total' should be a non-negative integer");
    let items = obj["items"].as_array().expect("'items' should be an array");

    for item in items {
        let item = item.as_object().expect("item should be an object");
        assert!(item["id"].is_u64(), "item 'id' should be an integer");
        assert!(item["by"].is_string(), "item 'by' should be a string");
        assert!(item["time"].is_i64(), "item 'time' should be an integer");
        assert!(
            item["title"].is_null() || item["title"].is_string(),
            "item 'title' should be null or string"
        );
        assert!(
            item["url"].is_null() || item["url"].is_string(),
            "item 'url' should be null or string"
        );
    }
}

/// Verifica el cuerpo `{ error, message }` de una respuesta de error.
pub fn assert_error_body(json: &Value, error: &str, message_contains: &str) {
    assert_eq!(json["error"], error, "unexpected error body: {}", json);

    let message = json["message"].as_str().expect("'message' should be a string");
    assert!(
        message.contains(message_contains),
        "expected message containing '{}', got '{}'",
        message_contains,
        message
    );
}

pub fn ids_of(page: &PagedResult<Item>) -> Vec<ItemId> {
    page.items.iter().map(|item| item.id).collect()
}
