//! File-backed snapshot store.
//!
//! # Invariants
//! - The blob lives at `<dir>/<key>.sqlite3`.
//! - Writes go through a sibling temp file and a rename, so a crash never
//!   leaves a half-written snapshot under the final name.

use super::{SnapshotStore, StoreError, StoreResult};
use log::debug;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Blob name used when the caller does not pick one.
pub const DEFAULT_SNAPSHOT_KEY: &str = "sqliteDb";

const SNAPSHOT_EXTENSION: &str = "sqlite3";

/// Snapshot store writing one file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    path: PathBuf,
}

impl FileSnapshotStore {
    pub fn new(dir: impl AsRef<Path>, key: &str) -> Self {
        let path = dir
            .as_ref()
            .join(format!("{key}.{SNAPSHOT_EXTENSION}"));
        Self { path }
    }

    /// Store rooted at `dir` using [`DEFAULT_SNAPSHOT_KEY`].
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir, DEFAULT_SNAPSHOT_KEY)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, op: &'static str, source: std::io::Error) -> StoreError {
        StoreError::Io {
            op,
            path: self.path.clone(),
            source,
        }
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn load(&self) -> StoreResult<Option<Vec<u8>>> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(self.io_error("read", err)),
        }
    }

    fn save(&self, bytes: &[u8]) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|err| self.io_error("create_dir", err))?;
        }

        let temp_path = self.path.with_extension("tmp");
        fs::write(&temp_path, bytes).map_err(|err| self.io_error("write_temp", err))?;
        fs::rename(&temp_path, &self.path).map_err(|err| self.io_error("rename_temp", err))?;

        debug!(
            "event=snapshot_save module=store status=ok size_bytes={}",
            bytes.len()
        );
        Ok(())
    }

    fn clear(&self) -> StoreResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(self.io_error("remove", err)),
        }
    }
}
