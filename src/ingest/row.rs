//! Row insertion

use crate::models::ValidatedField;
use crate::storage::{StorageError, TableStore};

/// Persists fully validated rows, one insert per row
#[derive(Debug, Clone, Copy, Default)]
pub struct RowIngestor;

impl RowIngestor {
    pub fn new() -> Self {
        Self
    }

    /// Insert one row into `table`
    ///
    /// The insert names exactly the columns of `fields`, in order. A rejected
    /// insert affects only this row.
    pub fn insert_row<S: TableStore + ?Sized>(
        &self,
        store: &S,
        table: &str,
        fields: &[ValidatedField],
    ) -> Result<usize, StorageError> {
        if fields.is_empty() {
            return Err(StorageError::Insert(format!(
                "no columns to insert into {}",
                table
            )));
        }
        store.insert_row(table, fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoStore;

    impl TableStore for NoStore {
        fn create_table_if_absent(
            &self,
            _table: &str,
            _columns: &[crate::storage::ColumnDefinition],
        ) -> Result<(), StorageError> {
            unreachable!()
        }

        fn table_exists(&self, _table: &str) -> Result<bool, StorageError> {
            unreachable!()
        }

        fn row_count(&self, _table: &str) -> Result<i64, StorageError> {
            unreachable!()
        }

        fn insert_row(
            &self,
            _table: &str,
            _fields: &[ValidatedField],
        ) -> Result<usize, StorageError> {
            unreachable!()
        }
    }

    #[test]
    fn test_empty_row_is_rejected_before_storage() {
        let err = RowIngestor::new().insert_row(&NoStore, "scores", &[]).unwrap_err();
        assert!(matches!(err, StorageError::Insert(_)));
    }
}
