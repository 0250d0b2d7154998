//! Sample inventories and documents.

use chrono::{DateTime, TimeZone, Utc};
use congelator_model::{starter_items, Category, Document, Item, ItemId, Location};

/// A one-item document in the legacy bare-array shape.
pub const LEGACY_SOUP_DOCUMENT: &str = r#"[{"id":"1","name":"Soup","category":"Plat","location":"Freezer","dateAdded":"2024-01-01T00:00:00Z"}]"#;

/// The item held by [`LEGACY_SOUP_DOCUMENT`].
pub fn legacy_soup_item() -> Item {
    Item {
        id: ItemId::new("1"),
        name: "Soup".into(),
        category: Category::Dish,
        location: Location::Freezer,
        date_added: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    }
}

/// Fixed reference instant used by the fixtures.
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

/// The starter inventory at `now`, one item per drawer.
///
/// The salmon is past the freshness horizon.
pub fn sample_items(now: DateTime<Utc>) -> Vec<Item> {
    starter_items(now)
}

/// A document built by adding [`sample_items`] one by one as `user`.
///
/// Items end up newest first, each with its `ADDED` entry.
pub fn sample_document(now: DateTime<Utc>, user: &str) -> Document {
    let mut items = sample_items(now);
    items.sort_by_key(|item| item.date_added);
    items.into_iter().fold(Document::empty(), |doc, item| {
        let at = item.date_added;
        doc.with_added(item, user, at)
    })
}

/// Encodes `items` in the legacy bare-array shape.
pub fn legacy_json(items: &[Item]) -> String {
    serde_json::to_string(items).expect("items serialize")
}
