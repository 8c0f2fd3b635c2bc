/*!
Command handlers for the CLI

This module provides command handlers invoked by the CLI entrypoint.

- `schedule` — add, list, delete and reset sessions
- `import`   — bulk import from pasted text
- `grid`     — weekly period x day grid
- `week`     — academic week calendar
- `theme`    — light/dark preference
- `check`    — slot availability

Handlers print to stdout; logging goes to stderr.
*/

pub mod check;
pub mod grid;
pub mod import;
pub mod schedule;
pub mod theme;
pub mod week;

use crate::config::Config;
use crate::error::Result;
use crate::storage::SledStore;
use chrono::NaiveDate;

/// Open the schedule database named by the configuration
///
/// Falls back to the default data directory when no path is configured.
pub fn open_storage(config: &Config) -> Result<SledStore> {
    match &config.storage.path {
        Some(path) => SledStore::new_with_path(path.clone()),
        None => SledStore::new(),
    }
}

/// Today's date in local time
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Date as shown to the user
pub(crate) fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}
