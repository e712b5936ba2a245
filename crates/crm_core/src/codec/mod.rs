//! Row codecs: typed records to and from flat SQLite rows.
//!
//! # Responsibility
//! - Map every record field to one storage cell and back.
//! - Keep the "structured value in a TEXT column" encoding in one place so
//!   repositories never see it.
//!
//! # Invariants
//! - Timestamps are stored as ISO-8601 UTC text with millisecond precision
//!   and a `Z` suffix, e.g. `2024-05-01T09:30:00.000Z`.
//! - Lists and objects are stored as compact JSON text, or NULL when absent.
//! - Optional text is stored as NULL when absent or empty, never as `''`.
//! - NULL and empty text both decode to "absent".
//! - `decode(encode(r)) == r` for every record without `Some("")` fields.

use crate::model::{Company, Contact, Deal, Entity, Note, Task, Timestamp};
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::types::Value;
use rusqlite::Row;
use serde::de::DeserializeOwned;
use serde::Serialize;

mod company;
mod contact;
mod deal;
mod note;
mod task;

pub type CodecResult<T> = Result<T, CodecError>;

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
    #[error("invalid JSON in {table}.{column}: {source}")]
    InvalidJson {
        table: &'static str,
        column: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode {table}.{column} as JSON: {source}")]
    JsonEncode {
        table: &'static str,
        column: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid timestamp `{value}` in {table}.{column}")]
    InvalidTimestamp {
        table: &'static str,
        column: &'static str,
        value: String,
    },
}

/// Storage mapping for one entity type.
pub trait EntityCodec: Entity {
    /// Backing table name.
    const TABLE: &'static str;
    /// Stored columns, in the order `encode` emits values.
    ///
    /// Also the allow-list of columns a listing may be ordered by.
    const COLUMNS: &'static [&'static str];

    fn encode(&self) -> CodecResult<Vec<Value>>;

    fn decode(row: &Row<'_>) -> CodecResult<Self>;
}

/// `(table, columns)` for every entity, in schema order.
pub fn entity_layouts() -> [(&'static str, &'static [&'static str]); 5] {
    [
        (Contact::TABLE, Contact::COLUMNS),
        (Company::TABLE, Company::COLUMNS),
        (Deal::TABLE, Deal::COLUMNS),
        (Task::TABLE, Task::COLUMNS),
        (Note::TABLE, Note::COLUMNS),
    ]
}

pub fn encode_timestamp(value: &Timestamp) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn decode_timestamp(
    table: &'static str,
    column: &'static str,
    value: &str,
) -> CodecResult<Timestamp> {
    DateTime::parse_from_rfc3339(value)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|_| CodecError::InvalidTimestamp {
            table,
            column,
            value: value.to_string(),
        })
}

/// Collects one row's cells in column order.
pub(crate) struct RowWriter {
    table: &'static str,
    values: Vec<Value>,
}

impl RowWriter {
    pub(crate) fn new(table: &'static str, columns: usize) -> Self {
        Self {
            table,
            values: Vec::with_capacity(columns),
        }
    }

    pub(crate) fn text(&mut self, value: &str) {
        self.values.push(Value::Text(value.to_string()));
    }

    pub(crate) fn optional_text(&mut self, value: Option<&str>) {
        self.values.push(match value {
            Some(text) if !text.is_empty() => Value::Text(text.to_string()),
            _ => Value::Null,
        });
    }

    pub(crate) fn timestamp(&mut self, value: &Timestamp) {
        self.values.push(Value::Text(encode_timestamp(value)));
    }

    pub(crate) fn optional_timestamp(&mut self, value: Option<&Timestamp>) {
        self.values.push(match value {
            Some(value) => Value::Text(encode_timestamp(value)),
            None => Value::Null,
        });
    }

    pub(crate) fn integer(&mut self, value: Option<i64>) {
        self.values.push(value.map_or(Value::Null, Value::Integer));
    }

    pub(crate) fn real(&mut self, value: Option<f64>) {
        self.values.push(value.map_or(Value::Null, Value::Real));
    }

    pub(crate) fn json<T: Serialize + ?Sized>(
        &mut self,
        column: &'static str,
        value: Option<&T>,
    ) -> CodecResult<()> {
        let cell = match value {
            Some(value) => Value::Text(serde_json::to_string(value).map_err(|source| {
                CodecError::JsonEncode {
                    table: self.table,
                    column,
                    source,
                }
            })?),
            None => Value::Null,
        };
        self.values.push(cell);
        Ok(())
    }

    pub(crate) fn finish(self) -> Vec<Value> {
        self.values
    }
}

/// Typed column access for one row of `table`.
pub(crate) struct RowReader<'a, 'stmt> {
    table: &'static str,
    row: &'a Row<'stmt>,
}

impl<'a, 'stmt> RowReader<'a, 'stmt> {
    pub(crate) fn new(table: &'static str, row: &'a Row<'stmt>) -> Self {
        Self { table, row }
    }

    pub(crate) fn text(&self, column: &'static str) -> CodecResult<String> {
        Ok(self.row.get(column)?)
    }

    pub(crate) fn optional_text(&self, column: &'static str) -> CodecResult<Option<String>> {
        let value: Option<String> = self.row.get(column)?;
        Ok(value.filter(|text| !text.is_empty()))
    }

    pub(crate) fn timestamp(&self, column: &'static str) -> CodecResult<Timestamp> {
        let value: String = self.row.get(column)?;
        decode_timestamp(self.table, column, &value)
    }

    pub(crate) fn optional_timestamp(
        &self,
        column: &'static str,
    ) -> CodecResult<Option<Timestamp>> {
        match self.optional_text(column)? {
            Some(value) => decode_timestamp(self.table, column, &value).map(Some),
            None => Ok(None),
        }
    }

    pub(crate) fn integer(&self, column: &'static str) -> CodecResult<Option<i64>> {
        Ok(self.row.get(column)?)
    }

    pub(crate) fn real(&self, column: &'static str) -> CodecResult<Option<f64>> {
        Ok(self.row.get(column)?)
    }

    /// Decodes a required JSON column.
    pub(crate) fn json<T: DeserializeOwned>(&self, column: &'static str) -> CodecResult<T> {
        let value: String = self.row.get(column)?;
        self.parse_json(column, &value)
    }

    /// Decodes an optional JSON column; NULL, `''` and `null` are absent.
    pub(crate) fn optional_json<T: DeserializeOwned>(
        &self,
        column: &'static str,
    ) -> CodecResult<Option<T>> {
        match self.optional_text(column)? {
            Some(value) => self.parse_json::<Option<T>>(column, &value),
            None => Ok(None),
        }
    }

    fn parse_json<T: DeserializeOwned>(&self, column: &'static str, value: &str) -> CodecResult<T> {
        serde_json::from_str(value).map_err(|source| CodecError::InvalidJson {
            table: self.table,
            column,
            source,
        })
    }
}
