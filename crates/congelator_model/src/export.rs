//! Export formats for local backups.

use crate::audit::AuditLogEntry;
use crate::error::{CodecError, CodecResult};
use crate::item::Item;

/// Default file name for an item backup.
pub const ITEMS_FILE_NAME: &str = "congelator_backup.json";

/// Default file name for an audit log export.
pub const LOG_FILE_NAME: &str = "congelator_history.txt";

/// Renders the items (and only the items) as pretty-printed JSON.
pub fn items_json(items: &[Item]) -> CodecResult<String> {
    serde_json::to_string_pretty(items).map_err(|e| CodecError::encoding_failed(e.to_string()))
}

/// Renders one audit entry as a line of text.
///
/// Format: `[DD/MM/YYYY] : <user> a <ACTION> "<itemName>" dans <category>.`
pub fn log_line(entry: &AuditLogEntry) -> String {
    format!(
        "[{}] : {} a {} \"{}\" dans {}.",
        entry.date.format("%d/%m/%Y"),
        entry.user,
        entry.action,
        entry.item_name,
        entry.category
    )
}

/// Renders the audit log as plain text, one entry per line, newest first.
pub fn log_text(logs: &[AuditLogEntry]) -> String {
    logs.iter().map(log_line).collect::<Vec<_>>().join("\n")
}
