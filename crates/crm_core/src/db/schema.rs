//! Table layout shared by every snapshot.
//!
//! # Responsibility
//! - Declare the five entity tables.
//! - Check that a restored snapshot carries them.
//!
//! # Invariants
//! - Column names and types are the snapshot wire contract; existing
//!   snapshots were written against exactly this layout, so it must not be
//!   reshaped here.
//! - There is no migration path; `CREATE TABLE IF NOT EXISTS` only.

use rusqlite::Connection;

/// Tables every valid snapshot must contain.
pub const TABLES: [&str; 5] = ["contacts", "companies", "deals", "tasks", "notes"];

pub const CREATE_TABLES_SQL: &str = "
  CREATE TABLE IF NOT EXISTS contacts (
    id TEXT PRIMARY KEY,
    avatar TEXT,
    initials TEXT,
    name TEXT NOT NULL,
    email TEXT,
    phone TEXT,
    position TEXT,
    company TEXT,
    address TEXT,
    state TEXT,
    city TEXT,
    zip TEXT,
    country TEXT,
    socialLinks TEXT,
    createdAt TEXT NOT NULL,
    updatedAt TEXT NOT NULL,
    logo TEXT
  );

  CREATE TABLE IF NOT EXISTS companies (
    id TEXT PRIMARY KEY,
    logo TEXT,
    name TEXT NOT NULL,
    domain TEXT,
    email TEXT,
    phone TEXT,
    description TEXT,
    categoryIds TEXT,
    contactIds TEXT,
    address TEXT,
    state TEXT,
    city TEXT,
    zip TEXT,
    country TEXT,
    angelList TEXT,
    linkedin TEXT,
    connectionStrengthId TEXT,
    x TEXT,
    instagram TEXT,
    facebook TEXT,
    telegram TEXT,
    createdAt TEXT NOT NULL,
    updatedAt TEXT NOT NULL,
    foundedAt TEXT,
    estimatedArrId TEXT,
    employeeRangeId TEXT,
    lastInteractionAt TEXT,
    lastContacted TEXT,
    teamId TEXT,
    badge TEXT
  );

  CREATE TABLE IF NOT EXISTS deals (
    id TEXT PRIMARY KEY,
    title TEXT NOT NULL,
    content TEXT NOT NULL,
    companyIds TEXT,
    contactIds TEXT,
    dealIds TEXT,
    userName TEXT NOT NULL,
    dueAt TEXT NOT NULL,
    completedAt TEXT,
    completedBy TEXT,
    assignedContactIds TEXT,
    status TEXT,
    priority TEXT,
    comments INTEGER,
    amount REAL,
    currency TEXT,
    paymentDate TEXT,
    paymentType TEXT,
    contractNumber TEXT,
    discount REAL,
    avatar TEXT,
    createdAt TEXT NOT NULL,
    updatedAt TEXT NOT NULL
  );

  CREATE TABLE IF NOT EXISTS tasks (
    id TEXT PRIMARY KEY,
    title TEXT NOT NULL,
    content TEXT NOT NULL,
    companyIds TEXT,
    contactIds TEXT,
    dealIds TEXT,
    createdBy TEXT NOT NULL,
    dueAt TEXT NOT NULL,
    completedAt TEXT,
    completedBy TEXT,
    assignedContactIds TEXT,
    status TEXT,
    priority TEXT,
    createdAt TEXT NOT NULL,
    updatedAt TEXT NOT NULL
  );

  CREATE TABLE IF NOT EXISTS notes (
    id TEXT PRIMARY KEY,
    title TEXT NOT NULL,
    content TEXT NOT NULL,
    createdBy TEXT NOT NULL,
    dueAt TEXT NOT NULL,
    status TEXT NOT NULL,
    createdAt TEXT NOT NULL,
    updatedAt TEXT NOT NULL,
    assignedContactIds TEXT NOT NULL,
    companyIds TEXT NOT NULL,
    dealIds TEXT,
    completedAt TEXT,
    completedBy TEXT,
    logo TEXT
  );
";

/// Creates any missing entity table.
pub fn apply_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(CREATE_TABLES_SQL)
}

/// Returns the first entity table missing from `conn`, if any.
pub fn missing_table(conn: &Connection) -> rusqlite::Result<Option<&'static str>> {
    for table in TABLES {
        if !table_exists(conn, table)? {
            return Ok(Some(table));
        }
    }
    Ok(None)
}

pub fn table_exists(conn: &Connection, table: &str) -> rusqlite::Result<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

/// Column names of `table` in declaration order.
pub fn table_columns(conn: &Connection, table: &str) -> rusqlite::Result<Vec<String>> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    let mut columns = Vec::new();
    while let Some(row) = rows.next()? {
        columns.push(row.get(1)?);
    }
    Ok(columns)
}
