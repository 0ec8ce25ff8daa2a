//! Persistence port for match snapshots and its adapters.
//!
//! The engine calls [`MatchStore::save`] once at the end of each mutating
//! operation. A failed save is logged by the caller and never alters the
//! in-memory match.

pub mod file;
pub mod memory;

use thiserror::Error;

use crate::domain::snapshot::MatchSnapshot;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("snapshot encoding error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("store is locked: {0}")]
    Locked(String),
}

/// Synchronous save/load port injected into a match.
pub trait MatchStore {
    fn save(&self, snapshot: &MatchSnapshot) -> Result<(), StoreError>;

    /// `Ok(None)` when nothing has been saved yet.
    fn load(&self) -> Result<Option<MatchSnapshot>, StoreError>;
}
