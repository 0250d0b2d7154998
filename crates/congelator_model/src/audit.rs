//! Audit log entries.

use crate::item::{Category, Item};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of mutation recorded in the audit log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuditAction {
    /// An item was added.
    #[serde(rename = "ADDED", alias = "AJOUTE")]
    Added,
    /// An item was removed.
    #[serde(rename = "REMOVED", alias = "SUPPRIME")]
    Removed,
}

impl AuditAction {
    /// Returns the wire name of the action.
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::Added => "ADDED",
            AuditAction::Removed => "REMOVED",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable record of one mutation.
///
/// The category is copied from the item so the history survives the
/// item's deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditLogEntry {
    /// When the mutation happened.
    pub date: DateTime<Utc>,
    /// Acting user identifier.
    pub user: String,
    /// Mutation kind.
    pub action: AuditAction,
    /// Name of the affected item.
    #[serde(rename = "itemName")]
    pub item_name: String,
    /// Category of the affected item.
    pub category: Category,
}

impl AuditLogEntry {
    /// Records the addition of `item`.
    pub fn added(item: &Item, user: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self::for_item(AuditAction::Added, item, user, at)
    }

    /// Records the removal of `item`.
    pub fn removed(item: &Item, user: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self::for_item(AuditAction::Removed, item, user, at)
    }

    fn for_item(
        action: AuditAction,
        item: &Item,
        user: impl Into<String>,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            date: at,
            user: user.into(),
            action,
            item_name: item.name.clone(),
            category: item.category,
        }
    }

    /// Returns true if this entry describes `action` on `item`.
    pub fn describes(&self, action: AuditAction, item: &Item) -> bool {
        self.action == action && self.item_name == item.name && self.category == item.category
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::Location;
    use chrono::TimeZone;

    fn sample_item() -> Item {
        Item::new(
            "Parsley",
            Category::Herbs,
            Location::Freezer,
            Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
        )
    }

    #[test]
    fn entries_copy_item_fields() {
        let item = sample_item();
        let at = Utc.with_ymd_and_hms(2024, 3, 2, 8, 0, 0).unwrap();

        let added = AuditLogEntry::added(&item, "alice", at);
        assert_eq!(added.action, AuditAction::Added);
        assert_eq!(added.item_name, "Parsley");
        assert_eq!(added.category, Category::Herbs);
        assert_eq!(added.date, at);
        assert!(added.describes(AuditAction::Added, &item));
        assert!(!added.describes(AuditAction::Removed, &item));

        let removed = AuditLogEntry::removed(&item, "bob", at);
        assert_eq!(removed.user, "bob");
        assert!(removed.describes(AuditAction::Removed, &item));
    }

    #[test]
    fn action_accepts_historical_spellings() {
        let added: AuditAction = serde_json::from_str("\"AJOUTE\"").unwrap();
        let removed: AuditAction = serde_json::from_str("\"SUPPRIME\"").unwrap();
        assert_eq!(added, AuditAction::Added);
        assert_eq!(removed, AuditAction::Removed);

        // Always written with the current spelling.
        assert_eq!(serde_json::to_string(&added).unwrap(), "\"ADDED\"");
    }

    #[test]
    fn entry_wire_format() {
        let item = sample_item();
        let at = Utc.with_ymd_and_hms(2024, 3, 2, 8, 0, 0).unwrap();
        let json = serde_json::to_value(AuditLogEntry::removed(&item, "alice", at)).unwrap();

        assert_eq!(json["date"], "2024-03-02T08:00:00Z");
        assert_eq!(json["user"], "alice");
        assert_eq!(json["action"], "REMOVED");
        assert_eq!(json["itemName"], "Parsley");
        assert_eq!(json["category"], "Aromatiques");
    }
}
