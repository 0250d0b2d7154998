//! Setup command implementation.

use crate::app::{App, CliResult};
use chrono::Utc;
use congelator_model::starter_items;

/// Runs the setup command.
pub async fn run(
    app: &App,
    credential: &str,
    document_id: Option<&str>,
    with_samples: bool,
) -> CliResult {
    let initial = if with_samples {
        starter_items(Utc::now())
    } else {
        Vec::new()
    };

    let mut store = app.open_store()?;
    let config = store.setup(credential, document_id, &initial).await?;
    store.hydrate().await?;

    match document_id {
        Some(_) => println!("Connected to document {}", config.document_id),
        None => println!("Created document {}", config.document_id),
    }
    println!(
        "{} items, {} history entries",
        store.items().len(),
        store.logs().len()
    );
    println!("Session saved to {}", app.config_store().path().display());
    Ok(())
}
