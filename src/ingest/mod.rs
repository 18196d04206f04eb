//! Ingestion of fixed-width data files
//!
//! Provides the per-file pipeline and the directory runner:
//! - DataFileProcessor: spec load, table creation, line validation and insert
//! - RowIngestor: one parameterized insert per valid row
//! - Runner: sequential processing of every file in a data directory

pub mod processor;
pub mod row;
pub mod runner;

pub use processor::{
    DataFileProcessor, FileFailure, FileOutcome, FileSummary, INVALID_DATA_MESSAGE, LineOutcome,
    resolve_table_name, slice_fields,
};
pub use row::RowIngestor;
pub use runner::{FileReport, Runner, discover_data_files};
