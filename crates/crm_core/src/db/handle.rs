//! Engine handle lifecycle: initialize, persist, reset.

use super::schema::{apply_schema, missing_table, table_columns};
use super::snapshot::{export_bytes, import_bytes};
use super::{DbError, DbResult};
use crate::codec::entity_layouts;
use crate::store::SnapshotStore;
use log::{debug, error, info};
use once_cell::unsync::OnceCell;
use rusqlite::Connection;
use std::time::Instant;

/// Application-owned database context.
///
/// Built once by the composition root and lent to repositories. Tests build
/// one per case over a fresh store, so no state leaks between them.
pub struct Database {
    store: Box<dyn SnapshotStore>,
    conn: OnceCell<Connection>,
}

impl Database {
    /// Creates an uninitialized handle persisting through `store`.
    pub fn new(store: impl SnapshotStore + 'static) -> Self {
        Self {
            store: Box::new(store),
            conn: OnceCell::new(),
        }
    }

    /// Returns the live connection, constructing it on first call.
    ///
    /// Loads the stored snapshot when there is one; otherwise creates the
    /// schema on an empty database and persists that image immediately.
    ///
    /// # Errors
    /// - `DbError::Store` when the snapshot cannot be read or first-saved.
    /// - `DbError::MalformedSnapshot` when stored bytes are not a database
    ///   carrying the entity tables.
    ///
    /// On error nothing is cached; the next call starts over.
    pub fn initialize(&self) -> DbResult<&Connection> {
        if let Some(conn) = self.conn.get() {
            return Ok(conn);
        }

        let started_at = Instant::now();
        info!("event=db_init module=db status=start");

        match self.conn.get_or_try_init(|| self.open_connection()) {
            Ok(conn) => {
                info!(
                    "event=db_init module=db status=ok duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                Ok(conn)
            }
            Err(err) => {
                error!(
                    "event=db_init module=db status=error duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }

    /// Returns the live connection without constructing it.
    pub fn handle(&self) -> DbResult<&Connection> {
        self.conn.get().ok_or(DbError::NotInitialized)
    }

    pub fn is_initialized(&self) -> bool {
        self.conn.get().is_some()
    }

    /// Writes the full current database image to the snapshot store.
    ///
    /// Cost is proportional to total database size, not to the change.
    pub fn persist(&self) -> DbResult<()> {
        let conn = self.handle()?;
        self.persist_connection(conn)
    }

    /// Returns the bytes `persist` would write.
    pub fn export_snapshot(&self) -> DbResult<Vec<u8>> {
        export_bytes(self.handle()?)
    }

    /// Drops the live connection and clears the stored snapshot.
    pub fn reset(&mut self) -> DbResult<()> {
        let had_connection = self.conn.take().is_some();
        self.store.clear()?;
        info!(
            "event=db_reset module=db status=ok had_connection={}",
            had_connection
        );
        Ok(())
    }

    fn open_connection(&self) -> DbResult<Connection> {
        match self.store.load()? {
            Some(bytes) => {
                let conn = import_bytes(&bytes)?;
                verify_snapshot(&conn)?;
                configure_connection(&conn)?;
                info!(
                    "event=db_open module=db status=ok mode=snapshot size_bytes={}",
                    bytes.len()
                );
                Ok(conn)
            }
            None => {
                let conn = Connection::open_in_memory()?;
                configure_connection(&conn)?;
                apply_schema(&conn)?;
                self.persist_connection(&conn)?;
                info!("event=db_open module=db status=ok mode=fresh");
                Ok(conn)
            }
        }
    }

    fn persist_connection(&self, conn: &Connection) -> DbResult<()> {
        let started_at = Instant::now();
        let bytes = export_bytes(conn)?;
        if let Err(err) = self.store.save(&bytes) {
            error!(
                "event=db_persist module=db status=error size_bytes={} error={}",
                bytes.len(),
                err
            );
            return Err(err.into());
        }
        debug!(
            "event=db_persist module=db status=ok size_bytes={} duration_ms={}",
            bytes.len(),
            started_at.elapsed().as_millis()
        );
        Ok(())
    }
}

fn configure_connection(conn: &Connection) -> DbResult<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    Ok(())
}

/// Checks that every entity table exists with exactly the codec's columns.
fn verify_snapshot(conn: &Connection) -> DbResult<()> {
    let malformed = |err: rusqlite::Error| DbError::MalformedSnapshot(err.to_string());

    if let Some(table) = missing_table(conn).map_err(malformed)? {
        return Err(DbError::MalformedSnapshot(format!(
            "missing table `{table}`"
        )));
    }

    for (table, expected) in entity_layouts() {
        let actual = table_columns(conn, table).map_err(malformed)?;
        if let Some(column) = expected
            .iter()
            .find(|column| !actual.iter().any(|name| name == *column))
        {
            return Err(DbError::MalformedSnapshot(format!(
                "table `{table}` has no column `{column}`"
            )));
        }
        if let Some(column) = actual
            .iter()
            .find(|name| !expected.contains(&name.as_str()))
        {
            return Err(DbError::MalformedSnapshot(format!(
                "table `{table}` has unexpected column `{column}`"
            )));
        }
    }

    Ok(())
}
