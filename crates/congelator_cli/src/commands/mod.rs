//! CLI command implementations.

pub mod add;
pub mod export;
pub mod list;
pub mod log;
pub mod remove;
pub mod session;
pub mod setup;
pub mod stats;

use chrono::{DateTime, Utc};

/// Date format used in every text listing.
pub(crate) fn short_date(at: DateTime<Utc>) -> String {
    at.format("%d/%m/%Y").to_string()
}
