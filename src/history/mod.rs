//! Local interaction history: a single-slot persisted log of past
//! generations, newest first.

pub mod file;
pub mod memory;
pub mod store;
pub mod traits;

pub use file::FileBackend;
pub use memory::MemoryBackend;
pub use store::{HistoryItem, HistoryStore, NewHistoryItem};
pub use traits::HistoryBackend;
