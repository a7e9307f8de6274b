//! File-based history backend.

use crate::error::Result;
use crate::history::store::HistoryItem;
use crate::history::traits::HistoryBackend;
use std::fs;
use std::path::PathBuf;

/// File-based single-slot backend with atomic writes.
///
/// The whole log is one `history.json` file under the base directory.
#[derive(Debug)]
pub struct FileBackend {
    base_dir: PathBuf,
}

impl FileBackend {
    /// Create a new file backend.
    ///
    /// Creates the base directory if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the base directory cannot be created.
    pub fn new(base_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    fn slot_path(&self) -> PathBuf {
        self.base_dir.join("history.json")
    }
}

impl HistoryBackend for FileBackend {
    fn load(&self) -> Result<Vec<HistoryItem>> {
        let path = self.slot_path();
        if !path.exists() {
            return Ok(Vec::new());
        }
        let contents = fs::read_to_string(&path)?;
        let items: Vec<HistoryItem> = serde_json::from_str(&contents)?;
        Ok(items)
    }

    fn save(&self, items: &[HistoryItem]) -> Result<()> {
        let path = self.slot_path();
        let temp = path.with_extension("tmp");

        // Write to temp file first
        let contents = serde_json::to_string_pretty(items)?;
        fs::write(&temp, &contents)?;

        // Atomic rename - prevents corruption if process crashes mid-write
        fs::rename(&temp, &path)?;

        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let path = self.slot_path();
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }
}
