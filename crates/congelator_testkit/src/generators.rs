//! Property-based test generators using proptest.
//!
//! Generated values always satisfy the model's invariants: categories and
//! locations come from the fixed vocabularies and timestamps are valid.

use chrono::{DateTime, Utc};
use congelator_model::{AuditAction, AuditLogEntry, Category, Document, Item, ItemId, Location};
use proptest::prelude::*;

/// Strategy for item ids: legacy short ids and v4-shaped UUIDs.
pub fn item_id_strategy() -> impl Strategy<Value = ItemId> {
    prop_oneof![
        1 => prop::string::string_regex("[0-9]{1,4}").expect("Invalid regex"),
        3 => prop::string::string_regex(
            "[0-9a-f]{8}-[0-9a-f]{4}-4[0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}"
        )
        .expect("Invalid regex"),
    ]
    .prop_map(ItemId::new)
}

/// Strategy for item names, including accents and characters JSON escapes.
pub fn item_name_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[A-Za-zéèàçô][A-Za-z0-9éèàçô '\"\\\\/-]{0,30}")
        .expect("Invalid regex")
}

/// Strategy for user names.
pub fn user_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z][a-z0-9_.]{0,15}").expect("Invalid regex")
}

/// Strategy for categories.
pub fn category_strategy() -> impl Strategy<Value = Category> {
    prop::sample::select(Category::ALL.to_vec())
}

/// Strategy for locations.
pub fn location_strategy() -> impl Strategy<Value = Location> {
    prop::sample::select(Location::ALL.to_vec())
}

/// Strategy for timestamps between 2017 and 2033, millisecond precision.
pub fn timestamp_strategy() -> impl Strategy<Value = DateTime<Utc>> {
    (1_500_000_000_000i64..2_000_000_000_000i64)
        .prop_filter_map("timestamp out of range", DateTime::<Utc>::from_timestamp_millis)
}

/// Strategy for items.
pub fn item_strategy() -> impl Strategy<Value = Item> {
    (
        item_id_strategy(),
        item_name_strategy(),
        category_strategy(),
        location_strategy(),
        timestamp_strategy(),
    )
        .prop_map(|(id, name, category, location, date_added)| Item {
            id,
            name,
            category,
            location,
            date_added,
        })
}

/// Strategy for audit actions.
pub fn audit_action_strategy() -> impl Strategy<Value = AuditAction> {
    prop_oneof![Just(AuditAction::Added), Just(AuditAction::Removed)]
}

/// Strategy for audit log entries.
pub fn audit_entry_strategy() -> impl Strategy<Value = AuditLogEntry> {
    (
        timestamp_strategy(),
        user_strategy(),
        audit_action_strategy(),
        item_name_strategy(),
        category_strategy(),
    )
        .prop_map(|(date, user, action, item_name, category)| AuditLogEntry {
            date,
            user,
            action,
            item_name,
            category,
        })
}

/// Strategy for item lists, as found in legacy documents.
pub fn items_strategy(max_items: usize) -> impl Strategy<Value = Vec<Item>> {
    prop::collection::vec(item_strategy(), 0..=max_items)
}

/// Strategy for documents.
pub fn document_strategy(
    max_items: usize,
    max_logs: usize,
) -> impl Strategy<Value = Document> {
    (
        items_strategy(max_items),
        prop::collection::vec(audit_entry_strategy(), 0..=max_logs),
    )
        .prop_map(|(items, logs)| Document { items, logs })
}

/// Strategy for blank inputs: empty or whitespace only.
pub fn blank_input_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[ \t\r\n]{0,8}").expect("Invalid regex")
}

/// Configuration for property tests.
#[derive(Debug, Clone)]
pub struct PropTestConfig {
    /// Number of test cases to run.
    pub cases: u32,
    /// Maximum shrink iterations.
    pub max_shrink_iters: u32,
}

impl Default for PropTestConfig {
    fn default() -> Self {
        Self {
            cases: 256,
            max_shrink_iters: 1000,
        }
    }
}

impl PropTestConfig {
    /// Creates a configuration for quick tests.
    #[must_use]
    pub fn quick() -> Self {
        Self {
            cases: 32,
            max_shrink_iters: 100,
        }
    }

    /// Converts to proptest config.
    #[must_use]
    pub fn to_proptest_config(&self) -> ProptestConfig {
        ProptestConfig {
            cases: self.cases,
            max_shrink_iters: self.max_shrink_iters,
            ..ProptestConfig::default()
        }
    }
}
