//! Fixed-width loader - specification-driven ingestion of fixed-width data files
//!
//! Provides:
//! - Specification loading (`<table>.csv` column layouts)
//! - Field validation and coercion
//! - Table creation from specifications
//! - Per-file processing with per-line error reporting
//! - Storage backends (DuckDB)

pub mod config;
pub mod error;
pub mod ingest;
pub mod models;
pub mod schema;
pub mod spec;
pub mod storage;
pub mod validation;

#[cfg(feature = "cli")]
pub mod cli;

// Re-export commonly used types
pub use config::{ConfigError, LoaderConfig};
pub use error::{FieldError, IngestError};
pub use ingest::{
    DataFileProcessor, FileFailure, FileOutcome, FileReport, FileSummary, Runner, resolve_table_name,
};
pub use models::{ColumnSpecification, DataType, StorageValue, ValidatedField};
pub use schema::TableSchemaManager;
pub use spec::SpecificationLoader;
pub use storage::{StorageError, TableStore};
#[cfg(feature = "duckdb-backend")]
pub use storage::DuckDbStore;
pub use validation::FieldValidator;
