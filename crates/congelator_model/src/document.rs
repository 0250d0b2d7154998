//! The remote-persisted document.

use crate::audit::AuditLogEntry;
use crate::item::{Category, Item, ItemId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The entire remote-persisted state: items plus audit log.
///
/// Both sequences are newest-first. Every candidate produced by
/// [`Document::with_added`] or [`Document::with_removed`] carries exactly
/// one new audit entry describing the item change, so the two sequences
/// always move together.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Document {
    /// Items in insertion order, newest first.
    pub items: Vec<Item>,
    /// Audit log, newest first.
    pub logs: Vec<AuditLogEntry>,
}

impl Document {
    /// Creates an empty document.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a document holding `items` and no log.
    pub fn from_items(items: Vec<Item>) -> Self {
        Self {
            items,
            logs: Vec::new(),
        }
    }

    /// Returns true if the document has no items and no log entries.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && self.logs.is_empty()
    }

    /// Looks up an item by id.
    pub fn find_item(&self, id: &ItemId) -> Option<&Item> {
        self.items.iter().find(|item| &item.id == id)
    }

    /// Returns the newest audit entry.
    pub fn latest_log(&self) -> Option<&AuditLogEntry> {
        self.logs.first()
    }

    /// Builds the candidate document with `item` prepended and a matching
    /// `ADDED` entry at the head of the log.
    pub fn with_added(&self, item: Item, user: &str, at: DateTime<Utc>) -> Document {
        let entry = AuditLogEntry::added(&item, user, at);

        let mut items = Vec::with_capacity(self.items.len() + 1);
        items.push(item);
        items.extend(self.items.iter().cloned());

        Document {
            items,
            logs: prepend(entry, &self.logs),
        }
    }

    /// Builds the candidate document without the item `id` and with a
    /// matching `REMOVED` entry at the head of the log.
    ///
    /// Returns `None` if no item has that id.
    pub fn with_removed(
        &self,
        id: &ItemId,
        user: &str,
        at: DateTime<Utc>,
    ) -> Option<(Document, Item)> {
        let removed = self.find_item(id)?.clone();
        let entry = AuditLogEntry::removed(&removed, user, at);

        let items = self
            .items
            .iter()
            .filter(|item| &item.id != id)
            .cloned()
            .collect();

        let candidate = Document {
            items,
            logs: prepend(entry, &self.logs),
        };
        Some((candidate, removed))
    }

    /// Number of items per category.
    pub fn category_counts(&self) -> BTreeMap<Category, usize> {
        let mut counts = BTreeMap::new();
        for item in &self.items {
            *counts.entry(item.category).or_insert(0) += 1;
        }
        counts
    }
}

fn prepend(entry: AuditLogEntry, logs: &[AuditLogEntry]) -> Vec<AuditLogEntry> {
    let mut out = Vec::with_capacity(logs.len() + 1);
    out.push(entry);
    out.extend_from_slice(logs);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::AuditAction;
    use crate::item::Location;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap()
    }

    fn item(name: &str, category: Category) -> Item {
        Item::new(name, category, Location::TopDrawer, now())
    }

    #[test]
    fn with_added_prepends_item_and_entry() {
        let doc = Document::from_items(vec![item("Steak", Category::Meat)]);
        let soup = item("Soup", Category::Dish);

        let candidate = doc.with_added(soup.clone(), "alice", now());

        assert_eq!(candidate.items.len(), 2);
        assert_eq!(candidate.items[0], soup);
        assert_eq!(candidate.logs.len(), 1);
        assert!(candidate.logs[0].describes(AuditAction::Added, &soup));

        // The source document is untouched.
        assert_eq!(doc.items.len(), 1);
        assert!(doc.logs.is_empty());
    }

    #[test]
    fn with_removed_drops_item_and_records_entry() {
        let steak = item("Steak", Category::Meat);
        let fish = item("Salmon", Category::Fish);
        let doc = Document::from_items(vec![steak.clone(), fish.clone()]);

        let (candidate, removed) = doc.with_removed(&steak.id, "bob", now()).unwrap();

        assert_eq!(removed, steak);
        assert_eq!(candidate.items, vec![fish]);
        assert_eq!(candidate.logs.len(), 1);
        assert!(candidate.logs[0].describes(AuditAction::Removed, &steak));
        assert_eq!(candidate.logs[0].user, "bob");
    }

    #[test]
    fn with_removed_unknown_id() {
        let doc = Document::from_items(vec![item("Steak", Category::Meat)]);
        assert!(doc.with_removed(&ItemId::new("missing"), "bob", now()).is_none());
    }

    #[test]
    fn log_stays_newest_first() {
        let a = item("A", Category::Sauce);
        let b = item("B", Category::Sauce);

        let doc = Document::empty()
            .with_added(a.clone(), "u", now())
            .with_added(b.clone(), "u", now());

        assert_eq!(doc.items[0].name, "B");
        assert_eq!(doc.logs[0].item_name, "B");
        assert_eq!(doc.logs[1].item_name, "A");
        assert_eq!(doc.latest_log().unwrap().item_name, "B");
    }

    #[test]
    fn category_counts() {
        let doc = Document::from_items(vec![
            item("Steak", Category::Meat),
            item("Ribs", Category::Meat),
            item("Salmon", Category::Fish),
        ]);

        let counts = doc.category_counts();
        assert_eq!(counts.get(&Category::Meat), Some(&2));
        assert_eq!(counts.get(&Category::Fish), Some(&1));
        assert_eq!(counts.get(&Category::Dish), None);
    }
}
