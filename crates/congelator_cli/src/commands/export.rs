//! Export command implementation.

use crate::app::{App, CliResult};
use clap::ValueEnum;
use congelator_model::export::{items_json, log_text, ITEMS_FILE_NAME, LOG_FILE_NAME};
use congelator_model::Document;
use std::fs;
use std::path::{Path, PathBuf};

/// What to export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportKind {
    /// The item collection as JSON.
    Items,
    /// The history as plain text.
    Log,
}

impl ExportKind {
    /// Default file name.
    pub fn file_name(&self) -> &'static str {
        match self {
            ExportKind::Items => ITEMS_FILE_NAME,
            ExportKind::Log => LOG_FILE_NAME,
        }
    }

    /// Renders the export.
    pub fn render(&self, document: &Document) -> CliResult<String> {
        Ok(match self {
            ExportKind::Items => items_json(&document.items)?,
            ExportKind::Log => log_text(&document.logs),
        })
    }
}

/// Runs the export command.
pub async fn run(app: &App, kind: ExportKind, output: Option<PathBuf>) -> CliResult {
    let store = app.hydrated_store().await?;
    let content = kind.render(store.document())?;

    let path = output.unwrap_or_else(|| PathBuf::from(kind.file_name()));
    if path == Path::new("-") {
        println!("{content}");
        return Ok(());
    }

    fs::write(&path, content)?;
    let count = match kind {
        ExportKind::Items => store.items().len(),
        ExportKind::Log => store.logs().len(),
    };
    println!("Wrote {count} entries to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use congelator_model::{Category, Item, Location};

    #[test]
    fn items_export_omits_history() {
        let at = Utc.with_ymd_and_hms(2024, 2, 3, 0, 0, 0).unwrap();
        let doc = Document::empty().with_added(
            Item::new("Ribs", Category::Meat, Location::BottomDrawer, at),
            "alice",
            at,
        );

        let items = ExportKind::Items.render(&doc).unwrap();
        assert!(items.trim_start().starts_with('['));
        assert!(!items.contains("alice"));

        let log = ExportKind::Log.render(&doc).unwrap();
        assert_eq!(log, "[03/02/2024] : alice a ADDED \"Ribs\" dans Viande.");
    }

    #[test]
    fn default_file_names() {
        assert_eq!(ExportKind::Items.file_name(), "congelator_backup.json");
        assert_eq!(ExportKind::Log.file_name(), "congelator_history.txt");
    }
}
