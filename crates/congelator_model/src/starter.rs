//! Starter inventory for a brand-new document.

use crate::item::{Category, Item, Location};
use chrono::{DateTime, Duration, Utc};

/// A small example inventory relative to `now`, one item per drawer.
///
/// The salmon is already past the freshness horizon so a new household
/// sees the expiry marker straight away.
pub fn starter_items(now: DateTime<Utc>) -> Vec<Item> {
    vec![
        Item::new(
            "Steak Haché x4",
            Category::Meat,
            Location::TopDrawer,
            now - Duration::days(30),
        ),
        Item::new(
            "Saumon",
            Category::Fish,
            Location::MiddleDrawer,
            now - Duration::days(212),
        ),
        Item::new(
            "Soupe de Potiron",
            Category::Dish,
            Location::BottomDrawer,
            now - Duration::days(61),
        ),
        Item::new("Persil", Category::Herbs, Location::Freezer, now),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn covers_every_drawer_with_one_expired_item() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let items = starter_items(now);
        for location in Location::ALL {
            assert!(items.iter().any(|item| item.location == location));
        }
        let expired: Vec<_> = items.iter().filter(|i| i.is_expired(now)).collect();
        assert_eq!(expired.len(), 1);
        assert_eq!(expired[0].name, "Saumon");
    }

    #[test]
    fn ids_are_distinct() {
        let items = starter_items(Utc::now());
        assert_ne!(items[0].id, items[1].id);
    }
}
