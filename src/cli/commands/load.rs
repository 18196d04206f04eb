//! Load command implementation

use std::path::PathBuf;

use crate::cli::error::CliError;
use crate::cli::output::{format_reports, format_reports_json};
use crate::config::LoaderConfig;
use crate::ingest::{DataFileProcessor, Runner};
use crate::spec::SpecificationLoader;
use crate::storage::DuckDbStore;

/// Arguments for the `load` command
pub struct LoadArgs {
    /// Resolved loader settings
    pub config: LoaderConfig,
    /// Data files to load; empty means every file in the data directory
    pub files: Vec<PathBuf>,
    /// Print reports as JSON
    pub json: bool,
}

/// Totals of a `load` run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadResult {
    pub files: usize,
    pub failed: usize,
}

/// Handle the `load` command
///
/// The database connection is opened once for the whole run and closed
/// before returning.
pub fn handle_load(args: &LoadArgs) -> Result<LoadResult, CliError> {
    let config = &args.config;
    let store = DuckDbStore::open(&config.database.to_string_lossy())?;

    let reports = {
        let processor =
            DataFileProcessor::new(&store, SpecificationLoader::new(config.spec_dir.clone()));
        let runner = Runner::new(processor);
        if args.files.is_empty() {
            runner.run_directory(&config.data_dir, &config.pattern)?
        } else {
            runner.run_files(&args.files)
        }
    };

    if args.json {
        println!("{}", format_reports_json(&reports)?);
    } else {
        print!("{}", format_reports(&reports));
    }

    let result = LoadResult {
        files: reports.len(),
        failed: reports.iter().filter(|report| !report.is_success()).count(),
    };

    store.close()?;
    Ok(result)
}
