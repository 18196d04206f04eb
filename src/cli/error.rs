//! CLI error type

use thiserror::Error;

use crate::config::ConfigError;
use crate::error::IngestError;
use crate::storage::StorageError;

/// Errors surfaced by CLI commands
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("{}", .0.user_message())]
    Ingest(#[from] IngestError),

    #[error("Failed to write output: {0}")]
    Output(#[from] serde_json::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
