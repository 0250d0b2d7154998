//! Remove command implementation.

use crate::app::{App, CliResult};
use congelator_model::{Item, ItemId};

/// Resolves `needle` to an item id: an exact id wins, otherwise a unique
/// prefix. Unknown ids are passed through unchanged.
pub fn resolve_id(items: &[Item], needle: &str) -> Result<ItemId, String> {
    let needle = needle.trim();
    if items.iter().any(|item| item.id.as_str() == needle) {
        return Ok(ItemId::new(needle));
    }

    let matches: Vec<&Item> = items
        .iter()
        .filter(|item| item.id.as_str().starts_with(needle))
        .collect();
    match matches.as_slice() {
        [] => Ok(ItemId::new(needle)),
        [only] => Ok(only.id.clone()),
        _ => Err(format!(
            "id prefix {needle:?} matches {} items",
            matches.len()
        )),
    }
}

/// Runs the remove command.
pub async fn run(app: &App, id: &str) -> CliResult {
    let mut store = app.hydrated_store().await?;
    let id = resolve_id(store.items(), id)?;
    let removed = store.remove_item(&id, &app.user).await?;
    println!("Removed \"{}\" ({})", removed.name, removed.id);
    Ok(())
}
