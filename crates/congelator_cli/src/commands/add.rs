//! Add command implementation.

use crate::app::{App, CliResult};
use congelator_model::{Category, Location};

/// Runs the add command.
pub async fn run(app: &App, name: &str, category: &str, location: &str) -> CliResult {
    let category: Category = category.parse()?;
    let location: Location = location.parse()?;

    let mut store = app.hydrated_store().await?;
    let item = store.add_item(name, category, location, &app.user).await?;

    println!(
        "Added \"{}\" ({}, {}) as {}",
        item.name, item.category, item.location, item.id
    );
    Ok(())
}
