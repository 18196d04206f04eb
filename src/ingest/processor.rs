//! Data file processing
//!
//! A data file `<table>_<suffix>` is processed in five steps: resolve the
//! table name, load its specification, ensure the table exists, process every
//! line, and finalize. The first three abort the whole file on failure. Line
//! failures are collected with their line number and the file is reported
//! failed only after every line has been attempted.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::row::RowIngestor;
use crate::error::{FieldError, IngestError};
use crate::models::{ColumnSpecification, ValidatedField};
use crate::schema::TableSchemaManager;
use crate::spec::{SPEC_EXTENSION, SpecificationLoader};
use crate::storage::{StorageError, TableStore};
use crate::validation::FieldValidator;

/// Top-level message of a file with invalid lines
pub const INVALID_DATA_MESSAGE: &str =
    "We found invalid data in the file. Some lines were not stored.";

/// Counts for a processed data file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileSummary {
    /// Table the file was loaded into
    pub table: String,
    /// Number of lines read
    pub lines_read: usize,
    /// Number of rows inserted
    pub rows_inserted: usize,
}

impl FileSummary {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            ..Default::default()
        }
    }
}

/// Why a data file was not fully stored
#[derive(Error, Debug)]
pub enum FileFailure {
    /// Nothing was processed
    #[error(transparent)]
    Structural(#[from] IngestError),

    /// Some lines were not stored; `lines` maps line numbers to explanations
    #[error("{message}")]
    InvalidLines {
        message: String,
        lines: BTreeMap<usize, String>,
        summary: FileSummary,
    },
}

impl FileFailure {
    /// Line explanations, in increasing line order (`None` for structural failures)
    pub fn line_errors(&self) -> Option<&BTreeMap<usize, String>> {
        match self {
            FileFailure::Structural(_) => None,
            FileFailure::InvalidLines { lines, .. } => Some(lines),
        }
    }

    /// Get a user-friendly error message for CLI output
    pub fn user_message(&self) -> String {
        match self {
            FileFailure::Structural(err) => err.user_message(),
            FileFailure::InvalidLines { message, .. } => message.clone(),
        }
    }
}

/// Result of processing one data file
pub type FileOutcome = Result<FileSummary, FileFailure>;

/// What happened to a single line
#[derive(Debug)]
pub enum LineOutcome {
    /// Every field validated and the row was inserted
    Inserted,
    /// One or more fields failed validation
    Invalid(Vec<FieldError>),
    /// Every field validated but the insert was rejected
    NotStored(StorageError),
}

impl LineOutcome {
    /// Explanation recorded for a failed line, quoting the line itself
    pub fn explanation(&self, line: &str) -> Option<String> {
        match self {
            LineOutcome::Inserted => None,
            LineOutcome::Invalid(errors) => {
                let reasons: Vec<String> = errors.iter().map(ToString::to_string).collect();
                Some(format!("{} - INVALID: {}", line, reasons.join("; ")))
            }
            LineOutcome::NotStored(err) => Some(format!("{} NOT STORED: {}", line, err)),
        }
    }
}

/// Derive the table name from a data file name
///
/// The table name is everything before the first underscore.
pub fn resolve_table_name(path: &Path) -> Result<String, IngestError> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    match file_name.split_once('_') {
        Some((table, _)) if !table.is_empty() => Ok(table.to_string()),
        _ => Err(IngestError::Naming(file_name)),
    }
}

/// Slice `line` into fixed-width fields, counting characters
///
/// Returns the fields that fit and, if the line ends before a field does,
/// the error for that field. Nothing after it is sliced. Characters past the
/// last field are ignored.
pub fn slice_fields<'a>(
    line: &'a str,
    specs: &[ColumnSpecification],
) -> (Vec<&'a str>, Option<FieldError>) {
    let boundaries: Vec<usize> = line
        .char_indices()
        .map(|(offset, _)| offset)
        .chain(std::iter::once(line.len()))
        .collect();
    let line_len = boundaries.len() - 1;

    let mut fields = Vec::with_capacity(specs.len());
    let mut start: usize = 0;
    for spec in specs {
        let end = match start.checked_add(spec.width()) {
            Some(end) if end <= line_len => end,
            end => {
                let err = FieldError::Truncated {
                    column: spec.name().to_string(),
                    line_len,
                    required: end.unwrap_or(usize::MAX),
                };
                return (fields, Some(err));
            }
        };
        fields.push(&line[boundaries[start]..boundaries[end]]);
        start = end;
    }

    (fields, None)
}

/// Processes data files into their tables
pub struct DataFileProcessor<'a, S: TableStore + ?Sized> {
    store: &'a S,
    loader: SpecificationLoader,
    schema: TableSchemaManager,
    validator: FieldValidator,
    ingestor: RowIngestor,
}

impl<'a, S: TableStore + ?Sized> DataFileProcessor<'a, S> {
    /// Create a processor writing to `store` with specifications from `loader`
    pub fn new(store: &'a S, loader: SpecificationLoader) -> Self {
        Self {
            store,
            loader,
            schema: TableSchemaManager::new(),
            validator: FieldValidator::new(),
            ingestor: RowIngestor::new(),
        }
    }

    /// Process one data file
    pub fn process(&self, path: &Path) -> FileOutcome {
        let table = resolve_table_name(path)?;
        tracing::info!(table = %table, "Processing {}", path.display());

        let specs = self.loader.load(&table)?;
        if specs.is_empty() {
            return Err(IngestError::SpecFormat {
                file_name: format!("{}.{}", table, SPEC_EXTENSION),
                reason: "does not define any columns".to_string(),
            }
            .into());
        }

        self.schema.ensure_table(self.store, &table, &specs)?;

        let read_error = |source| IngestError::FileRead {
            path: path.to_path_buf(),
            source,
        };
        let reader = BufReader::new(File::open(path).map_err(read_error)?);

        let mut summary = FileSummary::new(&table);
        let mut lines_with_error = BTreeMap::new();

        for (index, line) in reader.lines().enumerate() {
            let line = line.map_err(read_error)?;
            let line_number = index + 1;
            summary.lines_read += 1;

            let outcome = self.process_line(&table, &specs, &line);
            match outcome.explanation(&line) {
                None => summary.rows_inserted += 1,
                Some(explanation) => {
                    tracing::warn!(table = %table, line = line_number, "{}", explanation);
                    lines_with_error.insert(line_number, explanation);
                }
            }
        }

        tracing::info!(
            table = %table,
            lines = summary.lines_read,
            rows = summary.rows_inserted,
            failed = lines_with_error.len(),
            "Finished {}",
            path.display()
        );

        if lines_with_error.is_empty() {
            Ok(summary)
        } else {
            Err(FileFailure::InvalidLines {
                message: INVALID_DATA_MESSAGE.to_string(),
                lines: lines_with_error,
                summary,
            })
        }
    }

    /// Validate every field of `line` and insert the row if all are valid
    pub fn process_line(
        &self,
        table: &str,
        specs: &[ColumnSpecification],
        line: &str,
    ) -> LineOutcome {
        let (raw_fields, truncated) = slice_fields(line, specs);

        let mut fields = Vec::with_capacity(specs.len());
        let mut errors = Vec::new();
        for (spec, raw) in specs.iter().zip(raw_fields) {
            match self.validator.validate_value(raw, spec.data_type()) {
                Ok(value) => fields.push(ValidatedField::new(spec.name(), value)),
                Err(err) => errors.push(err),
            }
        }
        errors.extend(truncated);

        if !errors.is_empty() {
            return LineOutcome::Invalid(errors);
        }

        match self.ingestor.insert_row(self.store, table, &fields) {
            Ok(_) => LineOutcome::Inserted,
            Err(err) => LineOutcome::NotStored(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DataType;
    use std::path::PathBuf;

    fn specs() -> Vec<ColumnSpecification> {
        vec![
            ColumnSpecification::new("name", 10, DataType::Text),
            ColumnSpecification::new("valid", 1, DataType::Boolean),
            ColumnSpecification::new("count", 3, DataType::Integer),
        ]
    }

    #[test]
    fn test_resolve_table_name() {
        assert_eq!(
            resolve_table_name(&PathBuf::from("data/testformat1_2015-06-28.txt")).unwrap(),
            "testformat1"
        );
        assert_eq!(
            resolve_table_name(Path::new("scoreRecord_2016_10_04.txt")).unwrap(),
            "scoreRecord"
        );
    }

    #[test]
    fn test_resolve_table_name_without_underscore() {
        let err = resolve_table_name(Path::new("data/testformat1.txt")).unwrap_err();
        assert!(matches!(err, IngestError::Naming(name) if name == "testformat1.txt"));

        assert!(resolve_table_name(Path::new("_2015.txt")).is_err());
    }

    #[test]
    fn test_slice_fields_exact_width() {
        let (fields, truncated) = slice_fields("Foonyor   1  1", &specs());
        assert_eq!(fields, vec!["Foonyor   ", "1", "  1"]);
        assert!(truncated.is_none());
    }

    #[test]
    fn test_slice_fields_ignores_trailing_characters() {
        let (fields, truncated) = slice_fields("Foonyor   1  1 extra", &specs());
        assert_eq!(fields.len(), 3);
        assert_eq!(fields[2], "  1");
        assert!(truncated.is_none());
    }

    #[test]
    fn test_slice_fields_counts_characters_not_bytes() {
        let (fields, truncated) = slice_fields("Zoë Ösgård1 42", &specs());
        assert_eq!(fields, vec!["Zoë Ösgård", "1", " 42"]);
        assert!(truncated.is_none());
    }

    #[test]
    fn test_slice_fields_short_line() {
        let (fields, truncated) = slice_fields("Foonyor   1 ", &specs());
        assert_eq!(fields, vec!["Foonyor   ", "1"]);
        assert_eq!(
            truncated,
            Some(FieldError::Truncated {
                column: "count".to_string(),
                line_len: 12,
                required: 14,
            })
        );

        let (fields, truncated) = slice_fields("", &specs());
        assert!(fields.is_empty());
        assert!(matches!(truncated, Some(FieldError::Truncated { column, .. }) if column == "name"));
    }

    #[test]
    fn test_slice_fields_width_past_usize() {
        let specs = vec![
            ColumnSpecification::new("code", 1, DataType::Text),
            ColumnSpecification::new("amount", usize::MAX, DataType::Integer),
        ];
        let (fields, truncated) = slice_fields("x1", &specs);
        assert_eq!(fields, vec!["x"]);
        assert_eq!(
            truncated,
            Some(FieldError::Truncated {
                column: "amount".to_string(),
                line_len: 2,
                required: usize::MAX,
            })
        );
    }

    #[test]
    fn test_line_outcome_explanations() {
        let invalid = LineOutcome::Invalid(vec![
            FieldError::TypeMismatch {
                value: "x".to_string(),
                data_type: DataType::Boolean,
            },
            FieldError::EmptyValue,
        ]);
        assert_eq!(
            invalid.explanation("Barzane   x   ").unwrap(),
            "Barzane   x    - INVALID: x is not a valid BOOLEAN flag; Data cannot be empty."
        );

        let not_stored = LineOutcome::NotStored(StorageError::Insert("constraint".to_string()));
        assert_eq!(
            not_stored.explanation("Foonyor   1  1").unwrap(),
            "Foonyor   1  1 NOT STORED: Insert error: constraint"
        );

        assert!(LineOutcome::Inserted.explanation("anything").is_none());
    }
}
