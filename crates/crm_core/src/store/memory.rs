//! In-process snapshot store.

use super::{SnapshotStore, StoreError, StoreResult};
use std::sync::{Arc, Mutex};

/// Snapshot store kept in process memory.
///
/// Clones share the same blob, so a test can hand one clone to a
/// `Database`, drop it, and reopen from another clone to simulate a
/// process restart.
#[derive(Debug, Clone, Default)]
pub struct MemorySnapshotStore {
    blob: Arc<Mutex<Option<Vec<u8>>>>,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds `bytes`.
    pub fn with_bytes(bytes: Vec<u8>) -> Self {
        Self {
            blob: Arc::new(Mutex::new(Some(bytes))),
        }
    }

    /// Returns whether a snapshot is currently stored.
    pub fn is_empty(&self) -> bool {
        self.blob.lock().map(|blob| blob.is_none()).unwrap_or(true)
    }

    /// Number of bytes in the stored snapshot, `0` when empty.
    pub fn len(&self) -> usize {
        self.blob
            .lock()
            .map(|blob| blob.as_ref().map_or(0, Vec::len))
            .unwrap_or(0)
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn load(&self) -> StoreResult<Option<Vec<u8>>> {
        let blob = self.blob.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(blob.clone())
    }

    fn save(&self, bytes: &[u8]) -> StoreResult<()> {
        let mut blob = self.blob.lock().map_err(|_| StoreError::Poisoned)?;
        *blob = Some(bytes.to_vec());
        Ok(())
    }

    fn clear(&self) -> StoreResult<()> {
        let mut blob = self.blob.lock().map_err(|_| StoreError::Poisoned)?;
        *blob = None;
        Ok(())
    }
}
