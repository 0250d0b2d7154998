//! Stats command implementation.

use crate::app::{App, CliResult};
use chrono::{DateTime, Utc};
use congelator_model::{export::log_line, Document, Location};
use serde::Serialize;
use std::collections::BTreeMap;

/// Inventory totals.
#[derive(Debug, Serialize)]
pub struct InventoryStats {
    /// Number of items.
    pub total: usize,
    /// Items past the freshness horizon.
    pub expired: usize,
    /// Items per category (wire name).
    pub by_category: BTreeMap<String, usize>,
    /// Items per location (wire name).
    pub by_location: BTreeMap<String, usize>,
    /// Number of history entries.
    pub history_entries: usize,
    /// Most recent history entry, rendered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_activity: Option<String>,
}

/// Computes totals for `document` at `now`.
pub fn compute(document: &Document, now: DateTime<Utc>) -> InventoryStats {
    let by_category = document
        .category_counts()
        .into_iter()
        .map(|(category, count)| (category.to_string(), count))
        .collect();

    let mut by_location = BTreeMap::new();
    for location in Location::ALL {
        let count = document
            .items
            .iter()
            .filter(|item| item.location == location)
            .count();
        if count > 0 {
            by_location.insert(location.to_string(), count);
        }
    }

    InventoryStats {
        total: document.items.len(),
        expired: document.items.iter().filter(|i| i.is_expired(now)).count(),
        by_category,
        by_location,
        history_entries: document.logs.len(),
        last_activity: document.latest_log().map(log_line),
    }
}

/// Runs the stats command.
pub async fn run(app: &App, format: &str) -> CliResult {
    let store = app.hydrated_store().await?;
    let stats = compute(store.document(), Utc::now());

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&stats)?),
        _ => print_text(&stats),
    }
    Ok(())
}

fn print_text(stats: &InventoryStats) {
    println!("Items:    {}", stats.total);
    println!("Expired:  {}", stats.expired);
    println!();
    println!("By category:");
    for (category, count) in &stats.by_category {
        println!("  {category:<17} {count}");
    }
    println!("By location:");
    for (location, count) in &stats.by_location {
        println!("  {location:<17} {count}");
    }
    println!();
    println!("History:  {} entries", stats.history_entries);
    if let Some(last) = &stats.last_activity {
        println!("Last:     {last}");
    }
}
