//! Data directory runs
//!
//! Discovers the data files of a directory and processes them one after the
//! other, collecting a report per file.

use std::fs;
use std::path::{Path, PathBuf};

use super::processor::{DataFileProcessor, FileOutcome};
use crate::error::IngestError;
use crate::storage::TableStore;

/// Outcome of one data file in a run
#[derive(Debug)]
pub struct FileReport {
    /// File name without directory
    pub file_name: String,
    /// Full path of the file
    pub path: PathBuf,
    pub outcome: FileOutcome,
}

impl FileReport {
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Discover files matching `pattern` in `base_path`, sorted by path
pub fn discover_data_files(base_path: &Path, pattern: &str) -> Result<Vec<PathBuf>, IngestError> {
    let full_pattern = base_path.join(pattern);
    let full_pattern = full_pattern.to_string_lossy();

    let entries = glob::glob(&full_pattern)
        .map_err(|e| IngestError::InvalidPattern(format!("{}: {}", pattern, e)))?;

    let mut files = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) => {
                let is_file = fs::metadata(&path)
                    .map(|metadata| metadata.is_file())
                    .unwrap_or(false);
                if is_file {
                    files.push(path);
                }
            }
            Err(e) => {
                tracing::warn!("Error accessing path: {}", e);
            }
        }
    }

    files.sort();
    Ok(files)
}

/// Processes a set of data files sequentially
pub struct Runner<'a, S: TableStore + ?Sized> {
    processor: DataFileProcessor<'a, S>,
}

impl<'a, S: TableStore + ?Sized> Runner<'a, S> {
    pub fn new(processor: DataFileProcessor<'a, S>) -> Self {
        Self { processor }
    }

    /// Process every file in `data_dir` that matches `pattern`
    pub fn run_directory(
        &self,
        data_dir: &Path,
        pattern: &str,
    ) -> Result<Vec<FileReport>, IngestError> {
        let files = discover_data_files(data_dir, pattern)?;
        tracing::info!(
            files = files.len(),
            "Discovered data files in {}",
            data_dir.display()
        );
        Ok(self.run_files(&files))
    }

    /// Process `files` in the order given
    pub fn run_files(&self, files: &[PathBuf]) -> Vec<FileReport> {
        files
            .iter()
            .map(|path| FileReport {
                file_name: path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string()),
                path: path.clone(),
                outcome: self.processor.process(path),
            })
            .collect()
    }
}
