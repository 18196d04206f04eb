//! Error types for specification loading and file ingestion

use std::path::PathBuf;
use thiserror::Error;

use crate::models::DataType;
use crate::storage::StorageError;

/// Errors that abort processing of a whole data file
#[derive(Error, Debug)]
pub enum IngestError {
    /// No specification file for the table
    #[error("Whole file not processed. We could not find a matching spec file: {file_name}")]
    SpecFileMissing { file_name: String, path: PathBuf },

    /// Specification file has a malformed row
    #[error("Whole file not processed. Matching spec file: {file_name} {reason}")]
    SpecFormat { file_name: String, reason: String },

    /// Table name cannot be derived from the data file name
    #[error("Whole file not processed. Cannot derive a table name from file name: {0}")]
    Naming(String),

    /// Target table could not be created
    #[error("Error creating associated database table: {0}")]
    Schema(#[source] StorageError),

    /// Specification or data file could not be read
    #[error("Error reading file {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Data file pattern is not a valid glob
    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),
}

impl IngestError {
    /// Get a user-friendly error message for CLI output
    pub fn user_message(&self) -> String {
        match self {
            IngestError::SpecFileMissing { path, .. } => {
                format!(
                    "{self}\n\nHint: Add a specification file at {}.",
                    path.display()
                )
            }
            IngestError::SpecFormat { .. } => {
                format!(
                    "{self}\n\nHint: Each row must be 'name,width,dataType' with a positive \
                    width and a datatype of INTEGER, BOOLEAN or TEXT."
                )
            }
            IngestError::Naming(_) => {
                format!(
                    "{self}\n\nHint: Data files must be named '<table>_<suffix>', e.g. \
                    'scores_2024-01-31.txt'."
                )
            }
            IngestError::InvalidPattern(pattern) => {
                format!(
                    "Invalid glob pattern: {pattern}\n\n\
                    Hint: Use standard glob syntax like '*' or '*.txt'."
                )
            }
            _ => self.to_string(),
        }
    }
}

/// Errors for a single field of a data line
///
/// These never abort a file; they are collected into the explanation for the
/// line they occur on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// Trimmed field is empty; no column is nullable
    #[error("Data cannot be empty.")]
    EmptyValue,

    /// Field does not match its datatype
    #[error("{}", mismatch_message(.value, .data_type))]
    TypeMismatch { value: String, data_type: DataType },

    /// Datatype name outside INTEGER, BOOLEAN and TEXT
    #[error("{0} is not a known datatype")]
    UnknownDataType(String),

    /// Line ends before the field does
    #[error("{column}: line has {line_len} characters, field needs {required}")]
    Truncated {
        column: String,
        line_len: usize,
        required: usize,
    },
}

fn mismatch_message(value: &str, data_type: &DataType) -> String {
    match data_type {
        DataType::Integer => format!("{} is not an INTEGER", value),
        DataType::Boolean => format!("{} is not a valid BOOLEAN flag", value),
        DataType::Text => format!("{} is not valid TEXT", value),
    }
}
