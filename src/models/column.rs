//! Column specification model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Logical datatype of a column, as named in a specification file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DataType {
    /// Base-10 signed 32-bit integer
    Integer,
    /// `1` or `0` flag
    Boolean,
    /// Free text, sized by the column width
    Text,
}

impl DataType {
    /// Every datatype a specification file may name
    pub const ALL: [DataType; 3] = [DataType::Integer, DataType::Boolean, DataType::Text];

    /// Name of the datatype as written in specification files
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::Integer => "INTEGER",
            DataType::Boolean => "BOOLEAN",
            DataType::Text => "TEXT",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataType {
    type Err = String;

    /// Names are matched exactly; `integer` is not `INTEGER`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "INTEGER" => Ok(DataType::Integer),
            "BOOLEAN" => Ok(DataType::Boolean),
            "TEXT" => Ok(DataType::Text),
            _ => Err(format!("Unknown datatype: {}", s)),
        }
    }
}

/// Description of one table column in a fixed-width layout
///
/// A specification file holds one of these per row. The list order is the
/// left-to-right order of fields in a data line and the column order of the
/// target table.
///
/// # Example
///
/// ```rust
/// use fixed_width_loader::models::{ColumnSpecification, DataType};
///
/// let spec = ColumnSpecification::new("name", 10, DataType::Text);
/// assert_eq!(spec.width(), 10);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpecification {
    name: String,
    width: usize,
    data_type: DataType,
}

impl ColumnSpecification {
    /// Create a new column specification
    pub fn new(name: impl Into<String>, width: usize, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            width,
            data_type,
        }
    }

    /// Column name, used verbatim as the storage column identifier
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of characters the field occupies in a data line
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn data_type(&self) -> DataType {
        self.data_type
    }
}

impl fmt::Display for ColumnSpecification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} - {}", self.name, self.width, self.data_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_type_from_str() {
        assert_eq!("INTEGER".parse::<DataType>().unwrap(), DataType::Integer);
        assert_eq!("BOOLEAN".parse::<DataType>().unwrap(), DataType::Boolean);
        assert_eq!("TEXT".parse::<DataType>().unwrap(), DataType::Text);
        assert!("integer".parse::<DataType>().is_err());
        assert!("VARCHAR".parse::<DataType>().is_err());
    }

    #[test]
    fn test_data_type_round_trips_through_name() {
        for data_type in DataType::ALL {
            assert_eq!(data_type.as_str().parse::<DataType>().unwrap(), data_type);
        }
    }

    #[test]
    fn test_column_specification_display() {
        let spec = ColumnSpecification::new("valid", 1, DataType::Boolean);
        assert_eq!(spec.to_string(), "valid: 1 - BOOLEAN");
    }
}
