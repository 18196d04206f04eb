//! Table schemas derived from column specifications
//!
//! Tables are only ever created, never altered: an existing table is reused
//! as-is even if the specification has changed since it was created.

use crate::error::IngestError;
use crate::models::{ColumnSpecification, DataType};
use crate::storage::{ColumnDefinition, TableStore};

/// Storage type for a column specification
pub fn column_type(spec: &ColumnSpecification) -> String {
    match spec.data_type() {
        DataType::Integer => "INTEGER".to_string(),
        DataType::Boolean => "BOOLEAN".to_string(),
        DataType::Text => format!("VARCHAR({})", spec.width()),
    }
}

/// Ordered column-type mapping for a specification list
pub fn column_definitions(specs: &[ColumnSpecification]) -> Vec<ColumnDefinition> {
    specs
        .iter()
        .map(|spec| ColumnDefinition::new(spec.name(), column_type(spec)))
        .collect()
}

/// Creates target tables on demand
#[derive(Debug, Clone, Copy, Default)]
pub struct TableSchemaManager;

impl TableSchemaManager {
    pub fn new() -> Self {
        Self
    }

    /// Ensure `table` exists with columns derived from `specs`
    ///
    /// Returns `false` without touching the store when `specs` is empty, and
    /// `true` once the create-if-absent statement has been issued.
    pub fn ensure_table<S: TableStore + ?Sized>(
        &self,
        store: &S,
        table: &str,
        specs: &[ColumnSpecification],
    ) -> Result<bool, IngestError> {
        if specs.is_empty() {
            return Ok(false);
        }

        store
            .create_table_if_absent(table, &column_definitions(specs))
            .map_err(IngestError::Schema)?;
        tracing::debug!(table, columns = specs.len(), "Ensured table exists");
        Ok(true)
    }
}
