//! In-memory history backend for testing.

use crate::error::Result;
use crate::history::store::HistoryItem;
use crate::history::traits::HistoryBackend;
use std::sync::{Arc, RwLock};

/// In-memory single-slot backend. Clones share the same slot, so tests can
/// inspect what a store persisted.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    slot: Arc<RwLock<Option<Vec<HistoryItem>>>>,
}

impl MemoryBackend {
    /// Create a new in-memory backend with an absent slot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl HistoryBackend for MemoryBackend {
    fn load(&self) -> Result<Vec<HistoryItem>> {
        let slot = self.slot.read().unwrap();
        Ok(slot.clone().unwrap_or_default())
    }

    fn save(&self, items: &[HistoryItem]) -> Result<()> {
        let mut slot = self.slot.write().unwrap();
        *slot = Some(items.to_vec());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut slot = self.slot.write().unwrap();
        *slot = None;
        Ok(())
    }
}
