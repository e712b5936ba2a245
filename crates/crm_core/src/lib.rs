//! Typed persistence core for the CRM record store.
//!
//! One in-memory SQLite database holds contacts, companies, deals, tasks and
//! notes. Every mutation writes the whole database image back to a durable
//! byte store, so a restart reloads exactly what was last written.
//!
//! The model is single-threaded: one [`Database`] per process, owned by the
//! composition root and lent to repositories. Nothing here coordinates
//! concurrent writers.

pub mod codec;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod seed;
pub mod store;

pub use codec::{CodecError, EntityCodec};
pub use config::{open_database, BootstrapError, Bootstrapped, ConfigError, CoreConfig};
pub use db::{Database, DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::{
    new_record_id, timestamp_now, Company, CompanyPatch, Contact, ContactPatch, Deal, DealPatch,
    Entity, Note, NotePatch, SocialLinks, Task, TaskPatch, Timestamp,
};
pub use repo::{
    CompanyRepository, ContactRepository, DealRepository, ListOptions, ListResult,
    NoteRepository, OrderDirection, RepoError, RepoResult, Repository, SqliteRepository,
    TaskRepository,
};
pub use seed::{fixture_contacts, seed_contacts, SeedOutcome};
pub use store::{FileSnapshotStore, MemorySnapshotStore, SnapshotStore, StoreError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
