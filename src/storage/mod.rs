//! Storage backend abstraction
//!
//! Defines the TableStore trait the ingestion core writes through, and the
//! identifier rules every backend applies to table and column names:
//! - DuckDbStore: embedded DuckDB database (feature `duckdb-backend`)

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::ValidatedField;

/// Error type for storage operations
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Connection error: {0}")]
    Connection(String),
    #[error("Schema error: {0}")]
    Schema(String),
    #[error("Insert error: {0}")]
    Insert(String),
    #[error("Query error: {0}")]
    Query(String),
    #[error("Invalid identifier: {0:?}")]
    InvalidIdentifier(String),
}

/// A column of a table to be created, with its storage type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDefinition {
    pub name: String,
    pub sql_type: String,
}

impl ColumnDefinition {
    pub fn new(name: impl Into<String>, sql_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sql_type: sql_type.into(),
        }
    }
}

/// Trait for table storage backends
///
/// Every call is synchronous and either completes or fails; failures are
/// returned, never swallowed.
pub trait TableStore {
    /// Create `table` with `columns` unless a table of that name exists
    fn create_table_if_absent(
        &self,
        table: &str,
        columns: &[ColumnDefinition],
    ) -> Result<(), StorageError>;

    /// Check whether `table` exists
    fn table_exists(&self, table: &str) -> Result<bool, StorageError>;

    /// Count the rows stored in `table`
    fn row_count(&self, table: &str) -> Result<i64, StorageError>;

    /// Insert one row made of `fields`, in the order given
    fn insert_row(&self, table: &str, fields: &[ValidatedField]) -> Result<usize, StorageError>;
}

static IDENTIFIER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());

/// Check `name` against the identifier allow-list
///
/// Identifiers cannot be bound as parameters, so only plain names
/// (`[A-Za-z_][A-Za-z0-9_]*`) ever reach generated SQL.
pub fn validate_identifier(name: &str) -> Result<(), StorageError> {
    if IDENTIFIER_REGEX.is_match(name) {
        Ok(())
    } else {
        Err(StorageError::InvalidIdentifier(name.to_string()))
    }
}

/// Validate `name` and quote it for use in SQL
pub fn quote_identifier(name: &str) -> Result<String, StorageError> {
    validate_identifier(name)?;
    Ok(format!("\"{}\"", name))
}

/// Build `CREATE TABLE IF NOT EXISTS` for `table`
pub fn create_table_sql(table: &str, columns: &[ColumnDefinition]) -> Result<String, StorageError> {
    let definitions = columns
        .iter()
        .map(|column| {
            quote_identifier(&column.name).map(|name| format!("{} {}", name, column.sql_type))
        })
        .collect::<Result<Vec<_>, StorageError>>()?;

    Ok(format!(
        "CREATE TABLE IF NOT EXISTS {} ({})",
        quote_identifier(table)?,
        definitions.join(", ")
    ))
}

/// Build a parameterized `INSERT` naming exactly `fields`' columns
pub fn insert_sql(table: &str, fields: &[ValidatedField]) -> Result<String, StorageError> {
    let columns = fields
        .iter()
        .map(|field| quote_identifier(field.column()))
        .collect::<Result<Vec<_>, StorageError>>()?;
    let placeholders = vec!["?"; fields.len()];

    Ok(format!(
        "INSERT INTO {} ({}) VALUES ({})",
        quote_identifier(table)?,
        columns.join(", "),
        placeholders.join(", ")
    ))
}

#[cfg(feature = "duckdb-backend")]
pub mod duckdb_store;

#[cfg(feature = "duckdb-backend")]
pub use duckdb_store::DuckDbStore;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StorageValue;

    #[test]
    fn test_identifier_allow_list() {
        assert!(validate_identifier("scoreRecord").is_ok());
        assert!(validate_identifier("_col_1").is_ok());
        assert!(validate_identifier("1col").is_err());
        assert!(validate_identifier("name; DROP TABLE x").is_err());
        assert!(validate_identifier("na\"me").is_err());
        assert!(validate_identifier("").is_err());
    }

    #[test]
    fn test_create_table_sql() {
        let sql = create_table_sql(
            "testformat1",
            &[
                ColumnDefinition::new("name", "VARCHAR(10)"),
                ColumnDefinition::new("valid", "BOOLEAN"),
                ColumnDefinition::new("count", "INTEGER"),
            ],
        )
        .unwrap();
        assert_eq!(
            sql,
            "CREATE TABLE IF NOT EXISTS \"testformat1\" (\"name\" VARCHAR(10), \"valid\" BOOLEAN, \"count\" INTEGER)"
        );
    }

    #[test]
    fn test_insert_sql_uses_placeholders() {
        let fields = vec![
            ValidatedField::new("name", StorageValue::Text("Foonyor".to_string())),
            ValidatedField::new("valid", StorageValue::Boolean(true)),
        ];
        let sql = insert_sql("testformat1", &fields).unwrap();
        assert_eq!(
            sql,
            "INSERT INTO \"testformat1\" (\"name\", \"valid\") VALUES (?, ?)"
        );
        assert!(!sql.contains("Foonyor"));
    }

    #[test]
    fn test_invalid_table_name_rejected() {
        let err = insert_sql("bad-table", &[]).unwrap_err();
        assert!(matches!(err, StorageError::InvalidIdentifier(_)));
    }
}
