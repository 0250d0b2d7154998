//! Log command implementation.

use crate::app::{App, CliResult};
use congelator_model::export::log_line;

/// Runs the log command.
pub async fn run(app: &App, limit: Option<usize>, format: &str) -> CliResult {
    let store = app.hydrated_store().await?;
    let logs = store.logs();
    let shown = &logs[..limit.unwrap_or(logs.len()).min(logs.len())];

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(shown)?),
        _ if shown.is_empty() => println!("No history"),
        _ => {
            for entry in shown {
                println!("{}", log_line(entry));
            }
        }
    }
    Ok(())
}
