//! Storage-ready values produced by field validation

use std::fmt;

/// A field value converted for storage
///
/// `Display` renders the literal form stored data has always used: integers
/// as their original text, booleans as `true`/`false` and text wrapped in
/// single quotes. Inserts bind the typed value instead of the literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageValue {
    /// Integer with the text it was parsed from
    Integer { literal: String, value: i32 },
    Boolean(bool),
    Text(String),
}

impl fmt::Display for StorageValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageValue::Integer { literal, .. } => f.write_str(literal),
            StorageValue::Boolean(flag) => write!(f, "{}", flag),
            StorageValue::Text(text) => write!(f, "'{}'", text),
        }
    }
}

/// A validated field paired with the column it belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedField {
    column: String,
    value: StorageValue,
}

impl ValidatedField {
    pub fn new(column: impl Into<String>, value: StorageValue) -> Self {
        Self {
            column: column.into(),
            value,
        }
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn value(&self) -> &StorageValue {
        &self.value
    }
}
