//! The history store: an append-only (prepend-ordered) log with fail-soft
//! persistence.
//!
//! Persistence failures are logged and swallowed: a generation that
//! succeeded is never reported as failed because its history entry could
//! not be written.

use crate::history::traits::HistoryBackend;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::warn;
use uuid::Uuid;

/// One record of a past generation request and its result.
///
/// Immutable after creation; removed only by a full-store clear.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryItem {
    /// Unique identifier, generated at insert time.
    pub id: String,

    /// Name of the flow that produced this entry.
    pub feature: String,

    /// Creation instant, milliseconds since epoch.
    pub timestamp: i64,

    /// Submitted input fields (shape varies per flow).
    pub query: serde_json::Value,

    /// Produced output fields (large binary payloads redacted before storage).
    pub result: serde_json::Value,
}

/// A history entry before `id` and `timestamp` are assigned.
#[derive(Debug, Clone)]
pub struct NewHistoryItem {
    /// Name of the flow that produced this entry.
    pub feature: String,

    /// Submitted input fields.
    pub query: serde_json::Value,

    /// Produced output fields.
    pub result: serde_json::Value,
}

/// In-memory history sequence backed by a persistence slot.
///
/// All operations run on the caller's single logical thread; rapid
/// successive `add` calls preserve newest-first order and never drop an
/// entry.
pub struct HistoryStore {
    backend: Box<dyn HistoryBackend>,
    items: Vec<HistoryItem>,
    notify: watch::Sender<Vec<HistoryItem>>,
}

impl HistoryStore {
    /// Open the store, loading any persisted log.
    ///
    /// A missing or corrupt slot yields an empty store; the read error is
    /// logged, not raised.
    #[must_use]
    pub fn open(backend: Box<dyn HistoryBackend>) -> Self {
        let items = match backend.load() {
            Ok(items) => items,
            Err(e) => {
                warn!(error = %e, "Failed to load history, starting empty");
                Vec::new()
            }
        };
        let (notify, _) = watch::channel(items.clone());
        Self {
            backend,
            items,
            notify,
        }
    }

    /// Current sequence, newest first.
    #[must_use]
    pub fn items(&self) -> &[HistoryItem] {
        &self.items
    }

    /// Subscribe to store changes. Receivers observe the full newest-first
    /// sequence after every mutation.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Vec<HistoryItem>> {
        self.notify.subscribe()
    }

    /// Assign `id` and `timestamp`, prepend the item, and persist the full
    /// sequence. A persistence failure is logged; the in-memory update
    /// still takes effect.
    pub fn add(&mut self, new: NewHistoryItem) -> HistoryItem {
        let now = Utc::now();
        let item = HistoryItem {
            id: format!("{}-{}", now.timestamp_millis(), Uuid::new_v4()),
            feature: new.feature,
            timestamp: now.timestamp_millis(),
            query: new.query,
            result: new.result,
        };
        self.items.insert(0, item.clone());

        if let Err(e) = self.backend.save(&self.items) {
            warn!(error = %e, "Failed to persist history");
        }
        self.notify.send_replace(self.items.clone());
        item
    }

    /// Empty the sequence and remove the persisted slot. Idempotent: clearing
    /// an empty store is a no-op success. A persistence failure is logged.
    pub fn clear(&mut self) {
        self.items.clear();
        if let Err(e) = self.backend.clear() {
            warn!(error = %e, "Failed to clear persisted history");
        }
        self.notify.send_replace(Vec::new());
    }
}

impl std::fmt::Debug for HistoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistoryStore")
            .field("items", &self.items.len())
            .finish_non_exhaustive()
    }
}
