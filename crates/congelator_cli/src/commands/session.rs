//! Session management commands.

use crate::app::{App, CliResult};
use congelator_sync::SyncError;

/// Probes the configured document once.
pub async fn check(app: &App) -> CliResult {
    let store = app.open_store()?;
    let config = store
        .session()
        .config()
        .cloned()
        .ok_or(SyncError::NotConfigured)?;

    store.client().check_connection(&config).await?;
    println!("Document {} is reachable", config.document_id);
    Ok(())
}

/// Rotates the stored credential.
pub fn set_credential(app: &App, credential: &str) -> CliResult {
    let mut session = app.session()?;
    session.replace_credential(credential)?;
    println!("Credential updated");
    Ok(())
}

/// Deletes the stored session.
pub fn forget(app: &App) -> CliResult {
    let mut session = app.session()?;
    let was_configured = session.is_configured();
    session.clear()?;
    if was_configured {
        println!("Session removed");
    } else {
        println!("No session configured");
    }
    Ok(())
}
