//! Data model types for specification-driven ingestion

pub mod column;
pub mod value;

pub use column::{ColumnSpecification, DataType};
pub use value::{StorageValue, ValidatedField};
