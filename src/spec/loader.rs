//! Specification file loading

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::error::IngestError;
use crate::models::{ColumnSpecification, DataType};

/// Extension of specification files
pub const SPEC_EXTENSION: &str = "csv";

/// Number of attributes in every specification row
const ATTRIBUTE_COUNT: usize = 3;

/// Loads column specifications from a specification directory
#[derive(Debug, Clone)]
pub struct SpecificationLoader {
    spec_dir: PathBuf,
}

impl SpecificationLoader {
    /// Create a loader reading `<spec_dir>/<table>.csv`
    pub fn new(spec_dir: impl Into<PathBuf>) -> Self {
        Self {
            spec_dir: spec_dir.into(),
        }
    }

    /// Path of the specification file for `table`
    pub fn spec_path(&self, table: &str) -> PathBuf {
        self.spec_dir.join(format!("{}.{}", table, SPEC_EXTENSION))
    }

    /// Load the specification for `table`
    ///
    /// The whole file is parsed before anything is returned; the first bad
    /// row fails the load and no partial specification is produced.
    pub fn load(&self, table: &str) -> Result<Vec<ColumnSpecification>, IngestError> {
        let path = self.spec_path(table);
        if !path.exists() {
            return Err(IngestError::SpecFileMissing {
                file_name: spec_file_name(&path),
                path,
            });
        }

        let file = File::open(&path).map_err(|source| IngestError::FileRead {
            path: path.clone(),
            source,
        })?;
        let specs = parse_spec(file, &path)?;

        tracing::debug!(
            table,
            columns = specs.len(),
            "Loaded specification from {}",
            path.display()
        );
        Ok(specs)
    }
}

/// Parse specification rows from `reader`
///
/// `path` names the source in error messages. Rows must be
/// `name,width,dataType`; a row whose width attribute is literally `width`
/// (any case) is a header and is skipped.
pub fn parse_spec<R: Read>(
    reader: R,
    path: &Path,
) -> Result<Vec<ColumnSpecification>, IngestError> {
    let file_name = spec_file_name(path);
    let format_error = |reason: String| IngestError::SpecFormat {
        file_name: file_name.clone(),
        reason,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut specs = Vec::new();
    let mut seen = HashSet::new();

    for record in reader.records() {
        let record = record.map_err(|err| {
            let message = err.to_string();
            match err.into_kind() {
                csv::ErrorKind::Io(source) => IngestError::FileRead {
                    path: path.to_path_buf(),
                    source,
                },
                _ => format_error(format!("could not be parsed: {}", message)),
            }
        })?;
        let row = record.iter().collect::<Vec<_>>().join(",");

        if record.len() != ATTRIBUTE_COUNT {
            return Err(format_error(format!(
                "does not have exactly {} attributes: {}",
                ATTRIBUTE_COUNT, row
            )));
        }

        let (name, width, data_type) = (&record[0], &record[1], &record[2]);
        if width.eq_ignore_ascii_case("width") {
            continue;
        }

        let data_type = data_type
            .parse::<DataType>()
            .map_err(|_| format_error(format!("contains an unknown datatype: {}", data_type)))?;

        let width = match width.parse::<i32>() {
            Ok(width) if width > 0 => width as usize,
            _ => {
                return Err(format_error(format!(
                    "contains a width which is not a positive integer: {}",
                    row
                )));
            }
        };

        if name.is_empty() {
            return Err(format_error(format!("contains an empty column name: {}", row)));
        }
        if !seen.insert(name.to_string()) {
            return Err(format_error(format!(
                "contains a duplicate column name: {}",
                name
            )));
        }

        specs.push(ColumnSpecification::new(name, width, data_type));
    }

    Ok(specs)
}

fn spec_file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
