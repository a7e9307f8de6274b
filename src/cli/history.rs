//! History commands: list and clear.

use crate::config::load_config;
use crate::error::Result;
use crate::history::{FileBackend, HistoryStore};
use chrono::DateTime;

const DEFAULT_LIMIT: usize = 20;

fn open_store() -> Result<HistoryStore> {
    let config = load_config()?;
    let backend = FileBackend::new(config.storage.path)?;
    Ok(HistoryStore::open(Box::new(backend)))
}

/// List recent history entries, newest first.
///
/// # Errors
///
/// Returns an error if the storage directory cannot be opened.
pub fn list(limit: Option<usize>) -> Result<()> {
    let store = open_store()?;
    let limit = limit.unwrap_or(DEFAULT_LIMIT);

    if store.items().is_empty() {
        println!("No history yet.");
        return Ok(());
    }

    for item in store.items().iter().take(limit) {
        let when = DateTime::from_timestamp_millis(item.timestamp)
            .map_or_else(|| "unknown time".to_string(), |t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string());
        println!("{when}  {:<24}  {}", item.feature, item.query);
    }
    Ok(())
}

/// Clear the history log.
///
/// # Errors
///
/// Returns an error if the storage directory cannot be opened.
pub fn clear() -> Result<()> {
    let mut store = open_store()?;
    store.clear();
    println!("History cleared.");
    Ok(())
}
