//! List command implementation.

use super::short_date;
use crate::app::{App, CliResult};
use chrono::{DateTime, Utc};
use congelator_model::{Category, CategoryFilter, Item, Location};
use serde::Serialize;

/// Which items to show.
#[derive(Debug, Clone, Default)]
pub struct ListFilter {
    /// Category filter.
    pub category: CategoryFilter,
    /// Location filter.
    pub location: Option<Location>,
    /// Only expired items.
    pub expired_only: bool,
}

impl ListFilter {
    /// Returns true if `item` passes the filter at `now`.
    pub fn matches(&self, item: &Item, now: DateTime<Utc>) -> bool {
        self.category.matches(item.category)
            && self.location.map_or(true, |l| l == item.location)
            && (!self.expired_only || item.is_expired(now))
    }
}

/// One row of the listing.
#[derive(Debug, Serialize)]
pub struct ListedItem {
    /// Item id.
    pub id: String,
    /// Item name.
    pub name: String,
    /// Category.
    pub category: Category,
    /// Location.
    pub location: Location,
    /// Creation time.
    #[serde(rename = "dateAdded")]
    pub date_added: DateTime<Utc>,
    /// Age in days.
    pub age_days: u64,
    /// Past the freshness horizon.
    pub expired: bool,
}

/// Applies `filter` and computes ages at `now`.
pub fn select(items: &[Item], filter: &ListFilter, now: DateTime<Utc>) -> Vec<ListedItem> {
    items
        .iter()
        .filter(|item| filter.matches(item, now))
        .map(|item| ListedItem {
            id: item.id.to_string(),
            name: item.name.clone(),
            category: item.category,
            location: item.location,
            date_added: item.date_added,
            age_days: item.age_days(now),
            expired: item.is_expired(now),
        })
        .collect()
}

/// Runs the list command.
pub async fn run(
    app: &App,
    category: Option<&str>,
    location: Option<&str>,
    expired_only: bool,
    format: &str,
) -> CliResult {
    let filter = ListFilter {
        category: category.map(str::parse::<Category>).transpose()?.into(),
        location: location.map(str::parse::<Location>).transpose()?,
        expired_only,
    };

    let store = app.hydrated_store().await?;
    let rows = select(store.items(), &filter, Utc::now());

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&rows)?),
        _ => print_text(&rows),
    }
    Ok(())
}

fn print_text(rows: &[ListedItem]) {
    if rows.is_empty() {
        println!("No items");
        return;
    }
    for row in rows {
        let flag = if row.expired { "  EXPIRED" } else { "" };
        println!(
            "{:<8}  {:<28}  {:<12}  {:<17}  {}  {:>4}d{}",
            short_id(&row.id),
            row.name,
            row.category,
            row.location,
            short_date(row.date_added),
            row.age_days,
            flag
        );
    }
}

fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
    }

    fn items() -> Vec<Item> {
        vec![
            Item::new("Saumon", Category::Fish, Location::TopDrawer, now() - Duration::days(200)),
            Item::new("Ribs", Category::Meat, Location::TopDrawer, now() - Duration::days(2)),
            Item::new("Pesto", Category::Sauce, Location::Freezer, now()),
        ]
    }

    #[test]
    fn no_filter_lists_everything() {
        let rows = select(&items(), &ListFilter::default(), now());
        assert_eq!(rows.len(), 3);
        assert!(rows[0].expired);
        assert_eq!(rows[1].age_days, 2);
    }

    #[test]
    fn filters_combine() {
        let filter = ListFilter {
            location: Some(Location::TopDrawer),
            ..ListFilter::default()
        };
        assert_eq!(select(&items(), &filter, now()).len(), 2);

        let filter = ListFilter {
            category: CategoryFilter::Only(Category::Meat),
            location: Some(Location::TopDrawer),
            expired_only: false,
        };
        let rows = select(&items(), &filter, now());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Ribs");

        let filter = ListFilter {
            expired_only: true,
            ..ListFilter::default()
        };
        let rows = select(&items(), &filter, now());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Saumon");
    }

    #[test]
    fn json_rows_use_wire_names() {
        let rows = select(&items()[..1], &ListFilter::default(), now());
        let json = serde_json::to_value(&rows).unwrap();
        assert_eq!(json[0]["category"], "Poisson");
        assert_eq!(json[0]["location"], "Tiroir Haut");
        assert_eq!(json[0]["expired"], true);
    }

    #[test]
    fn short_ids() {
        assert_eq!(short_id("1"), "1");
        assert_eq!(short_id("0123456789"), "01234567");
    }
}
