//! SQLite-backed business store.

use super::entity::Entity;
use super::error::StoreError;
use super::models::Record;
use super::schema::BUSINESS_VERSIONED_SCHEMAS;
use super::trait_def::{BusinessStore, RecordStore};
use crate::sqlite_persistence::{open_versioned, Table};
use anyhow::{anyhow, Context, Result};
use rusqlite::{params, Connection, Row, ToSql};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;
use uuid::Uuid;

#[derive(Clone)]
pub struct SqliteBusinessStore {
    conn: Arc<Mutex<Connection>>,
}

fn now_timestamp() -> i64 {
    chrono::Utc::now().timestamp()
}

fn column_list(table: &Table) -> String {
    table
        .columns
        .iter()
        .map(|c| c.name)
        .collect::<Vec<_>>()
        .join(", ")
}

fn read_record<E: Entity>(row: &Row<'_>) -> rusqlite::Result<Record<E>> {
    Ok(Record {
        id: row.get("id")?,
        fields: E::from_row(row)?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

fn is_foreign_key_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY
    )
}

fn map_write_error<E: Entity>(err: rusqlite::Error) -> anyhow::Error {
    if is_foreign_key_violation(&err) {
        anyhow!(StoreError::InvalidReference { kind: E::KIND })
    } else {
        anyhow::Error::from(err).context(format!("Failed to write {}", E::KIND))
    }
}

impl SqliteBusinessStore {
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let conn = open_versioned(db_path.as_ref(), BUSINESS_VERSIONED_SCHEMAS)
            .context("Failed to open business database")?;
        Ok(SqliteBusinessStore {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow!("Business database connection lock poisoned"))
    }

    fn select_records<E: Entity>(
        &self,
        filter: Option<(&str, &str)>,
    ) -> Result<Vec<Record<E>>> {
        let table = E::TABLE;
        let conn = self.conn()?;
        let records = match filter {
            Some((column, value)) => {
                let sql = format!(
                    "SELECT {} FROM {} WHERE {} = ?1 ORDER BY created_at DESC, rowid DESC",
                    column_list(table),
                    table.name,
                    column
                );
                let mut stmt = conn.prepare(&sql)?;
                let rows = stmt
                    .query_map(params![value], read_record::<E>)?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                rows
            }
            None => {
                let sql = format!(
                    "SELECT {} FROM {} ORDER BY created_at DESC, rowid DESC",
                    column_list(table),
                    table.name
                );
                let mut stmt = conn.prepare(&sql)?;
                let rows = stmt
                    .query_map([], read_record::<E>)?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                rows
            }
        };
        Ok(records)
    }

    fn select_record<E: Entity>(&self, id: &str) -> Result<Option<Record<E>>> {
        let table = E::TABLE;
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM {} WHERE id = ?1",
            column_list(table),
            table.name
        ))?;
        let mut rows = stmt.query_map(params![id], read_record::<E>)?;
        match rows.next() {
            Some(record) => Ok(Some(record?)),
            None => Ok(None),
        }
    }
}

impl<E: Entity> RecordStore<E> for SqliteBusinessStore {
    fn list(&self) -> Result<Vec<Record<E>>> {
        self.select_records(None)
    }

    fn list_by(&self, column: &str, value: &str) -> Result<Vec<Record<E>>> {
        if !E::TABLE.columns.iter().any(|c| c.name == column) {
            return Err(anyhow!(StoreError::UnknownColumn(column.to_string())));
        }
        self.select_records(Some((column, value)))
    }

    fn get(&self, id: &str) -> Result<Option<Record<E>>> {
        self.select_record(id)
    }

    fn create(&self, fields: E) -> Result<Record<E>> {
        let table = E::TABLE;
        let id = Uuid::new_v4().to_string();
        let now = now_timestamp();

        let mut values: Vec<&dyn ToSql> = Vec::with_capacity(table.columns.len());
        values.push(&id);
        values.extend(fields.sql_values());
        values.push(&now);
        values.push(&now);

        let placeholders = (1..=values.len())
            .map(|i| format!("?{}", i))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            table.name,
            column_list(table),
            placeholders
        );

        self.conn()?
            .execute(&sql, values.as_slice())
            .map_err(map_write_error::<E>)?;
        debug!("Created {} {}", E::KIND, id);

        Ok(Record {
            id,
            fields,
            created_at: now,
            updated_at: now,
        })
    }

    fn update(&self, id: &str, fields: E) -> Result<Record<E>> {
        let table = E::TABLE;
        let now = now_timestamp();
        let id_owned = id.to_string();

        let mut values: Vec<&dyn ToSql> = fields.sql_values();
        let assignments = E::data_columns()
            .enumerate()
            .map(|(i, name)| format!("{} = ?{}", name, i + 1))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "UPDATE {} SET {}, updated_at = ?{} WHERE id = ?{}",
            table.name,
            assignments,
            values.len() + 1,
            values.len() + 2
        );
        values.push(&now);
        values.push(&id_owned);

        let changed = self
            .conn()?
            .execute(&sql, values.as_slice())
            .map_err(map_write_error::<E>)?;
        if changed == 0 {
            return Err(anyhow!(StoreError::NotFound {
                kind: E::KIND,
                id: id_owned,
            }));
        }

        self.select_record(id)?.ok_or_else(|| {
            anyhow!(StoreError::NotFound {
                kind: E::KIND,
                id: id.to_string(),
            })
        })
    }

    fn delete(&self, id: &str) -> Result<()> {
        let changed = self
            .conn()?
            .execute(
                &format!("DELETE FROM {} WHERE id = ?1", E::TABLE.name),
                params![id],
            )
            .with_context(|| format!("Failed to delete {} {}", E::KIND, id))?;
        if changed == 0 {
            return Err(anyhow!(StoreError::NotFound {
                kind: E::KIND,
                id: id.to_string(),
            }));
        }
        debug!("Deleted {} {}", E::KIND, id);
        Ok(())
    }
}

impl BusinessStore for SqliteBusinessStore {}
