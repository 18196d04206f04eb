//! Count command implementation

use crate::cli::error::CliError;
use crate::config::LoaderConfig;
use crate::storage::{DuckDbStore, TableStore, validate_identifier};

/// Arguments for the `count` command
pub struct CountArgs {
    pub config: LoaderConfig,
    /// Table to count rows of
    pub table: String,
}

/// Handle the `count` command
pub fn handle_count(args: &CountArgs) -> Result<i64, CliError> {
    validate_identifier(&args.table)
        .map_err(|_| CliError::InvalidArgument(format!("Invalid table name: {}", args.table)))?;

    let store = DuckDbStore::open(&args.config.database.to_string_lossy())?;
    if !store.table_exists(&args.table)? {
        store.close()?;
        return Err(CliError::InvalidArgument(format!(
            "Table not found: {}",
            args.table
        )));
    }

    let count = store.row_count(&args.table)?;
    println!("{}: {} row(s)", args.table, count);

    store.close()?;
    Ok(count)
}
