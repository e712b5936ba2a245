//! Whole-database image export and import.
//!
//! # Invariants
//! - Exported bytes are a complete SQLite database file image.
//! - Imported bytes are copied into a `sqlite3_malloc` buffer that SQLite
//!   takes ownership of; the caller's slice is never borrowed past the call.

use super::{DbError, DbResult};
use rusqlite::serialize::OwnedData;
use rusqlite::{Connection, DatabaseName};
use std::ptr::NonNull;

/// Serializes the main database of `conn`.
pub fn export_bytes(conn: &Connection) -> DbResult<Vec<u8>> {
    let data = conn.serialize(DatabaseName::Main)?;
    Ok(data.to_vec())
}

/// Opens a writable in-memory connection holding the image in `bytes`.
///
/// SQLite reads the image lazily, so garbage input is only detected by the
/// first query; callers must validate the result before trusting it.
pub fn import_bytes(bytes: &[u8]) -> DbResult<Connection> {
    let owned = owned_data_from_bytes(bytes)?;
    let mut conn = Connection::open_in_memory()?;
    conn.deserialize(DatabaseName::Main, owned, false)
        .map_err(|err| DbError::MalformedSnapshot(err.to_string()))?;
    Ok(conn)
}

fn owned_data_from_bytes(bytes: &[u8]) -> DbResult<OwnedData> {
    if bytes.is_empty() {
        return Err(DbError::MalformedSnapshot("snapshot is empty".to_string()));
    }

    let size: i32 = bytes.len().try_into().map_err(|_| {
        DbError::MalformedSnapshot(format!("snapshot of {} bytes is too large", bytes.len()))
    })?;

    // SAFETY: `raw` is checked for null and sized for `bytes`; ownership of
    // the allocation moves into `OwnedData`, which SQLite frees.
    unsafe {
        let raw = rusqlite::ffi::sqlite3_malloc(size) as *mut u8;
        let ptr = NonNull::new(raw).ok_or(DbError::SnapshotAllocation(bytes.len()))?;
        std::ptr::copy_nonoverlapping(bytes.as_ptr(), ptr.as_ptr(), bytes.len());
        Ok(OwnedData::from_raw_nonnull(ptr, bytes.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::{export_bytes, import_bytes};
    use crate::db::DbError;
    use rusqlite::Connection;

    #[test]
    fn exported_image_imports_with_rows_intact() {
        let src = Connection::open_in_memory().unwrap();
        src.execute_batch("CREATE TABLE t (v TEXT); INSERT INTO t VALUES ('kept');")
            .unwrap();

        let bytes = export_bytes(&src).unwrap();
        let dst = import_bytes(&bytes).unwrap();

        let value: String = dst.query_row("SELECT v FROM t", [], |row| row.get(0)).unwrap();
        assert_eq!(value, "kept");
        dst.execute("INSERT INTO t VALUES ('writable')", []).unwrap();
    }

    #[test]
    fn empty_image_is_rejected() {
        let err = import_bytes(&[]).unwrap_err();
        assert!(matches!(err, DbError::MalformedSnapshot(_)));
    }
}
