//! DuckDB storage backend
//!
//! Implements TableStore on an embedded DuckDB database, either file-backed
//! or in-memory. The store owns its connection; `close` releases it.

use ::duckdb::{Connection, ToSql, params_from_iter};

use super::{ColumnDefinition, StorageError, TableStore, create_table_sql, insert_sql};
use super::{quote_identifier, validate_identifier};
use crate::models::{StorageValue, ValidatedField};

/// Table store backed by a single DuckDB connection
pub struct DuckDbStore {
    conn: Connection,
    path: Option<String>,
}

impl DuckDbStore {
    /// Open or create a database at the given path
    pub fn open(path: &str) -> Result<Self, StorageError> {
        let conn = Connection::open(path).map_err(|e| StorageError::Connection(e.to_string()))?;
        tracing::debug!("Opened DuckDB database at {}", path);
        Ok(Self {
            conn,
            path: Some(path.to_string()),
        })
    }

    /// Open an in-memory database (for testing)
    pub fn memory() -> Result<Self, StorageError> {
        let conn =
            Connection::open_in_memory().map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(Self { conn, path: None })
    }

    /// Get the database path (if not in-memory)
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Run a statement outside the TableStore surface (test setup, maintenance)
    pub fn execute_batch(&self, sql: &str) -> Result<(), StorageError> {
        self.conn
            .execute_batch(sql)
            .map_err(|e| StorageError::Query(e.to_string()))
    }

    /// Close the connection
    pub fn close(self) -> Result<(), StorageError> {
        self.conn
            .close()
            .map_err(|(_, e)| StorageError::Connection(e.to_string()))
    }
}

impl TableStore for DuckDbStore {
    fn create_table_if_absent(
        &self,
        table: &str,
        columns: &[ColumnDefinition],
    ) -> Result<(), StorageError> {
        let sql = create_table_sql(table, columns)?;
        tracing::debug!("{}", sql);
        self.conn
            .execute_batch(&sql)
            .map_err(|e| StorageError::Schema(e.to_string()))
    }

    fn table_exists(&self, table: &str) -> Result<bool, StorageError> {
        validate_identifier(table)?;
        let count: i64 = self
            .conn
            .query_row(
                "SELECT COUNT(*) FROM information_schema.tables WHERE lower(table_name) = lower(?)",
                [table],
                |row| row.get(0),
            )
            .map_err(|e| StorageError::Query(e.to_string()))?;
        Ok(count > 0)
    }

    fn row_count(&self, table: &str) -> Result<i64, StorageError> {
        let sql = format!("SELECT COUNT(*) FROM {}", quote_identifier(table)?);
        self.conn
            .query_row(&sql, [], |row| row.get(0))
            .map_err(|e| StorageError::Query(e.to_string()))
    }

    fn insert_row(&self, table: &str, fields: &[ValidatedField]) -> Result<usize, StorageError> {
        let sql = insert_sql(table, fields)?;
        let params = fields.iter().map(|field| match field.value() {
            StorageValue::Integer { value, .. } => value as &dyn ToSql,
            StorageValue::Boolean(flag) => flag as &dyn ToSql,
            StorageValue::Text(text) => text as &dyn ToSql,
        });

        self.conn
            .execute(&sql, params_from_iter(params))
            .map_err(|e| StorageError::Insert(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_columns() -> Vec<ColumnDefinition> {
        vec![
            ColumnDefinition::new("name", "VARCHAR(10)"),
            ColumnDefinition::new("valid", "BOOLEAN"),
            ColumnDefinition::new("count", "INTEGER"),
        ]
    }

    fn sample_row(name: &str, valid: bool, count: i32) -> Vec<ValidatedField> {
        vec![
            ValidatedField::new("name", StorageValue::Text(name.to_string())),
            ValidatedField::new("valid", StorageValue::Boolean(valid)),
            ValidatedField::new(
                "count",
                StorageValue::Integer {
                    literal: count.to_string(),
                    value: count,
                },
            ),
        ]
    }

    #[test]
    fn test_create_table_is_idempotent() {
        let store = DuckDbStore::memory().unwrap();
        assert!(!store.table_exists("testformat1").unwrap());

        store
            .create_table_if_absent("testformat1", &sample_columns())
            .unwrap();
        store
            .create_table_if_absent("testformat1", &sample_columns())
            .unwrap();

        assert!(store.table_exists("testformat1").unwrap());
        assert_eq!(store.row_count("testformat1").unwrap(), 0);
    }

    #[test]
    fn test_insert_and_count() {
        let store = DuckDbStore::memory().unwrap();
        store
            .create_table_if_absent("testformat1", &sample_columns())
            .unwrap();

        assert_eq!(
            store
                .insert_row("testformat1", &sample_row("Foonyor", true, 1))
                .unwrap(),
            1
        );
        store
            .insert_row("testformat1", &sample_row("O'Brien", false, -12))
            .unwrap();

        assert_eq!(store.row_count("testformat1").unwrap(), 2);
    }

    #[test]
    fn test_insert_rejected_by_storage() {
        let store = DuckDbStore::memory().unwrap();
        store
            .execute_batch("CREATE TABLE checked (id INTEGER CHECK (id > 0))")
            .unwrap();

        let row = vec![ValidatedField::new(
            "id",
            StorageValue::Integer {
                literal: "-1".to_string(),
                value: -1,
            },
        )];
        let err = store.insert_row("checked", &row).unwrap_err();
        assert!(matches!(err, StorageError::Insert(_)));
        assert_eq!(store.row_count("checked").unwrap(), 0);
    }

    #[test]
    fn test_row_count_missing_table() {
        let store = DuckDbStore::memory().unwrap();
        assert!(matches!(
            store.row_count("nothing"),
            Err(StorageError::Query(_))
        ));
    }

    #[test]
    fn test_close() {
        let store = DuckDbStore::memory().unwrap();
        assert!(store.path().is_none());
        store.close().unwrap();
    }
}
