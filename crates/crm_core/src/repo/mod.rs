//! Repository layer: per-entity CRUD and paged listing.
//!
//! # Responsibility
//! - Expose `create/get/list/update/delete` for every entity type.
//! - Translate storage failures into semantic errors (`DuplicateId`,
//!   `InvalidOrderColumn`, `MutationNotPersisted`).
//!
//! # Invariants
//! - Every successful mutation persists a full snapshot before returning.
//! - Reads never persist and never fail on a missing id.
//! - Caller-supplied order columns are checked against the entity's column
//!   list before any SQL is built.

use crate::codec::{CodecError, EntityCodec};
use crate::db::{Database, DbError};
use crate::model::{Company, Contact, Deal, Note, Task};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

mod sqlite_repo;

pub use sqlite_repo::SqliteRepository;

pub type RepoResult<T> = Result<T, RepoError>;

pub type ContactRepository<'db> = SqliteRepository<'db, Contact>;
pub type CompanyRepository<'db> = SqliteRepository<'db, Company>;
pub type DealRepository<'db> = SqliteRepository<'db, Deal>;
pub type TaskRepository<'db> = SqliteRepository<'db, Task>;
pub type NoteRepository<'db> = SqliteRepository<'db, Note>;

#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error(transparent)]
    Db(#[from] DbError),
    #[error("invalid persisted data: {0}")]
    Codec(#[from] CodecError),
    #[error("{table} record already exists: {id}")]
    DuplicateId { table: &'static str, id: String },
    #[error("cannot order {table} by unknown column `{column}`")]
    InvalidOrderColumn { table: &'static str, column: String },
    #[error("{table} record {id} was changed but the snapshot was not saved: {source}")]
    MutationNotPersisted {
        table: &'static str,
        id: String,
        #[source]
        source: DbError,
    },
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Sort direction for listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OrderDirection {
    Asc,
    #[default]
    Desc,
}

impl OrderDirection {
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl Display for OrderDirection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_sql())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown order direction `{0}`; expected ASC or DESC")]
pub struct UnknownOrderDirection(pub String);

impl FromStr for OrderDirection {
    type Err = UnknownOrderDirection;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "ASC" => Ok(Self::Asc),
            "DESC" => Ok(Self::Desc),
            _ => Err(UnknownOrderDirection(value.to_string())),
        }
    }
}

/// Paging and ordering for `Repository::list`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    /// Maximum rows to return; `None` returns every row.
    pub limit: Option<u32>,
    /// Rows to skip from the start of the ordered result.
    pub offset: Option<u32>,
    /// Stored column name to sort by. Defaults to `createdAt`.
    pub order_by: Option<String>,
    pub order_direction: OrderDirection,
}

/// One page of records plus the table's total row count.
#[derive(Debug, Clone, PartialEq)]
pub struct ListResult<E> {
    pub data: Vec<E>,
    /// Count of all rows in the table, independent of `limit`/`offset`.
    pub total: u64,
}

/// CRUD contract shared by all entity repositories.
pub trait Repository<E: EntityCodec> {
    /// Inserts `record` and returns it as stored.
    ///
    /// The returned value equals what `get` reads back: timestamps are cut
    /// to milliseconds and empty optional values come back absent.
    fn create(&self, record: E) -> RepoResult<E>;
    fn get(&self, id: &str) -> RepoResult<Option<E>>;
    fn list(&self, options: &ListOptions) -> RepoResult<ListResult<E>>;
    /// Merges `patch` into the stored record and returns it as stored;
    /// `None` when `id` is unknown.
    fn update(&self, id: &str, patch: E::Patch) -> RepoResult<Option<E>>;
    /// Removes the record; succeeds whether or not it existed.
    fn delete(&self, id: &str) -> RepoResult<()>;
    /// Number of stored records.
    fn count(&self) -> RepoResult<u64>;
}

impl Database {
    pub fn contacts(&self) -> ContactRepository<'_> {
        SqliteRepository::new(self)
    }

    pub fn companies(&self) -> CompanyRepository<'_> {
        SqliteRepository::new(self)
    }

    pub fn deals(&self) -> DealRepository<'_> {
        SqliteRepository::new(self)
    }

    pub fn tasks(&self) -> TaskRepository<'_> {
        SqliteRepository::new(self)
    }

    pub fn notes(&self) -> NoteRepository<'_> {
        SqliteRepository::new(self)
    }
}
