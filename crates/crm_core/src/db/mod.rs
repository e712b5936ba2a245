//! Embedded SQLite engine handle and snapshot durability.
//!
//! # Responsibility
//! - Own the single in-memory SQLite connection behind the repositories.
//! - Bootstrap it from the durable snapshot, or from an empty schema.
//! - Write a full snapshot back after every mutation.
//!
//! # Invariants
//! - Repositories must not touch the connection before `initialize`
//!   succeeds.
//! - A failed `initialize` leaves the handle uninitialized and retryable.
//! - The handle is single-threaded: one live connection, no locking.

use crate::store::StoreError;

mod handle;
pub mod schema;
pub mod snapshot;

pub use handle::Database;

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database not initialized; call initialize() first")]
    NotInitialized,
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("snapshot is not a valid database: {0}")]
    MalformedSnapshot(String),
    #[error("failed to allocate {0} bytes for snapshot import")]
    SnapshotAllocation(usize),
}
