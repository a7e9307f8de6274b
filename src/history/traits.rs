//! History backend trait definition.

use crate::error::Result;
use crate::history::store::HistoryItem;

/// Persistence backend for the history log.
///
/// The log lives in a single named slot: reads return the full sequence,
/// writes replace it wholesale. No partial updates.
pub trait HistoryBackend: Send + Sync {
    /// Read the full persisted sequence. An absent slot is an empty log.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot exists but cannot be read or parsed.
    fn load(&self) -> Result<Vec<HistoryItem>>;

    /// Replace the persisted sequence with `items`.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    fn save(&self, items: &[HistoryItem]) -> Result<()>;

    /// Remove the slot entirely. Clearing an absent slot is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    fn clear(&self) -> Result<()>;
}
