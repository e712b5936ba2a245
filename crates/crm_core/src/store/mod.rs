//! Durable byte store for whole-database snapshots.
//!
//! # Responsibility
//! - Hold exactly one named blob: the latest serialized database image.
//! - Hide the concrete backing medium from the engine handle.
//!
//! # Invariants
//! - `save` fully overwrites the previous blob; there is no history.
//! - `load` after `clear` returns `None`.
//! - `clear` on an empty store succeeds.

use std::io;
use std::path::PathBuf;

mod file;
mod memory;

pub use file::{FileSnapshotStore, DEFAULT_SNAPSHOT_KEY};
pub use memory::MemorySnapshotStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Byte-store read/write failure.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("snapshot store {op} failed for `{}`: {source}", path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("snapshot store lock poisoned")]
    Poisoned,
}

/// Storage contract the engine handle persists snapshots through.
pub trait SnapshotStore: Send {
    /// Returns the stored snapshot, or `None` when nothing was saved yet.
    fn load(&self) -> StoreResult<Option<Vec<u8>>>;
    /// Replaces the stored snapshot with `bytes`.
    fn save(&self, bytes: &[u8]) -> StoreResult<()>;
    /// Removes the stored snapshot.
    fn clear(&self) -> StoreResult<()>;
}

