//! SQLite implementation of [`Repository`] for any [`EntityCodec`].

use super::{ListOptions, ListResult, RepoError, RepoResult, Repository};
use crate::codec::EntityCodec;
use crate::db::Database;
use crate::model::timestamp_now;
use log::debug;
use rusqlite::types::Value;
use rusqlite::{params_from_iter, ErrorCode};
use std::iter;
use std::marker::PhantomData;

const DEFAULT_ORDER_COLUMN: &str = "createdAt";

/// Repository for entity `E` over the shared [`Database`].
pub struct SqliteRepository<'db, E> {
    db: &'db Database,
    _entity: PhantomData<fn() -> E>,
}

impl<'db, E: EntityCodec> SqliteRepository<'db, E> {
    pub fn new(db: &'db Database) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }

    fn persist_after(&self, op: &'static str, id: &str) -> RepoResult<()> {
        self.db
            .persist()
            .map_err(|source| RepoError::MutationNotPersisted {
                table: E::TABLE,
                id: id.to_string(),
                source,
            })?;
        debug!(
            "event=record_{} module=repo status=ok table={} id={}",
            op,
            E::TABLE,
            id
        );
        Ok(())
    }
}

impl<E: EntityCodec> Repository<E> for SqliteRepository<'_, E> {
    fn create(&self, record: E) -> RepoResult<E> {
        let conn = self.db.handle()?;
        let values = record.encode()?;
        debug_assert_eq!(values.len(), E::COLUMNS.len());

        let stored = match conn.query_row(&insert_sql::<E>(), params_from_iter(values), |row| {
            Ok(E::decode(row))
        }) {
            Ok(decoded) => decoded?,
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == ErrorCode::ConstraintViolation
                    && err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY =>
            {
                return Err(RepoError::DuplicateId {
                    table: E::TABLE,
                    id: record.id().to_string(),
                });
            }
            Err(err) => return Err(err.into()),
        };

        self.persist_after("create", stored.id())?;
        Ok(stored)
    }

    fn get(&self, id: &str) -> RepoResult<Option<E>> {
        let conn = self.db.handle()?;
        let mut stmt = conn.prepare(&format!("{} WHERE id = ?1;", select_sql::<E>()))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(E::decode(row)?));
        }

        Ok(None)
    }

    fn list(&self, options: &ListOptions) -> RepoResult<ListResult<E>> {
        let order_column = resolve_order_column::<E>(options.order_by.as_deref())?;
        let conn = self.db.handle()?;

        let mut sql = format!(
            "{} ORDER BY {} {}",
            select_sql::<E>(),
            order_column,
            options.order_direction.as_sql()
        );
        // Stable tie-break so consecutive pages never overlap.
        if order_column != "id" {
            sql.push_str(", id ASC");
        }

        let mut bind_values: Vec<Value> = Vec::new();
        if let Some(limit) = options.limit {
            sql.push_str(" LIMIT ?");
            bind_values.push(Value::Integer(i64::from(limit)));
            if let Some(offset) = options.offset {
                sql.push_str(" OFFSET ?");
                bind_values.push(Value::Integer(i64::from(offset)));
            }
        } else if let Some(offset) = options.offset {
            sql.push_str(" LIMIT -1 OFFSET ?");
            bind_values.push(Value::Integer(i64::from(offset)));
        }

        let mut stmt = conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut data = Vec::new();
        while let Some(row) = rows.next()? {
            data.push(E::decode(row)?);
        }

        Ok(ListResult {
            data,
            total: self.count()?,
        })
    }

    fn update(&self, id: &str, patch: E::Patch) -> RepoResult<Option<E>> {
        let Some(mut record) = self.get(id)? else {
            return Ok(None);
        };

        record.merge(patch);
        record.set_updated_at(timestamp_now());

        let conn = self.db.handle()?;
        let values = record.encode()?;
        let bind_values = values
            .into_iter()
            .chain(iter::once(Value::Text(id.to_string())));
        let stored =
            conn.query_row(&update_sql::<E>(), params_from_iter(bind_values), |row| {
                Ok(E::decode(row))
            })??;

        self.persist_after("update", id)?;
        Ok(Some(stored))
    }

    fn delete(&self, id: &str) -> RepoResult<()> {
        let conn = self.db.handle()?;
        conn.execute(&format!("DELETE FROM {} WHERE id = ?1;", E::TABLE), [id])?;

        self.persist_after("delete", id)
    }

    fn count(&self) -> RepoResult<u64> {
        let conn = self.db.handle()?;
        let total: i64 = conn.query_row(
            &format!("SELECT COUNT(*) FROM {};", E::TABLE),
            [],
            |row| row.get(0),
        )?;
        Ok(u64::try_from(total).unwrap_or(0))
    }
}

fn resolve_order_column<E: EntityCodec>(requested: Option<&str>) -> RepoResult<&'static str> {
    let Some(requested) = requested else {
        return Ok(DEFAULT_ORDER_COLUMN);
    };

    E::COLUMNS
        .iter()
        .copied()
        .find(|column| *column == requested)
        .ok_or_else(|| RepoError::InvalidOrderColumn {
            table: E::TABLE,
            column: requested.to_string(),
        })
}

fn select_sql<E: EntityCodec>() -> String {
    format!("SELECT {} FROM {}", E::COLUMNS.join(", "), E::TABLE)
}

fn insert_sql<E: EntityCodec>() -> String {
    let placeholders = (1..=E::COLUMNS.len())
        .map(|index| format!("?{index}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "INSERT INTO {table} ({columns}) VALUES ({placeholders}) RETURNING {columns};",
        table = E::TABLE,
        columns = E::COLUMNS.join(", "),
    )
}

fn update_sql<E: EntityCodec>() -> String {
    let assignments = E::COLUMNS
        .iter()
        .enumerate()
        .map(|(index, column)| format!("{column} = ?{}", index + 1))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "UPDATE {} SET {} WHERE id = ?{} RETURNING {};",
        E::TABLE,
        assignments,
        E::COLUMNS.len() + 1,
        E::COLUMNS.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::{insert_sql, resolve_order_column, update_sql};
    use crate::model::Task;
    use crate::repo::RepoError;

    #[test]
    fn order_column_defaults_to_created_at() {
        assert_eq!(resolve_order_column::<Task>(None).unwrap(), "createdAt");
        assert_eq!(resolve_order_column::<Task>(Some("dueAt")).unwrap(), "dueAt");
    }

    #[test]
    fn order_column_outside_allow_list_is_rejected() {
        let err = resolve_order_column::<Task>(Some("title; DROP TABLE tasks")).unwrap_err();
        assert!(matches!(
            err,
            RepoError::InvalidOrderColumn { table: "tasks", .. }
        ));
    }

    #[test]
    fn generated_statements_bind_every_column() {
        let insert = insert_sql::<Task>();
        assert!(insert.starts_with("INSERT INTO tasks (id, title, content,"));
        assert!(insert.contains("VALUES (?1, ?2,"));
        assert!(insert.contains("?15) RETURNING id, title,"));

        let update = update_sql::<Task>();
        assert!(update.contains("updatedAt = ?15"));
        assert!(update.contains("WHERE id = ?16 RETURNING id,"));
        assert!(update.ends_with("createdAt, updatedAt;"));
    }
}
