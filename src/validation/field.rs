//! Field validation and coercion
//!
//! No column is nullable: an empty field is always an error. Integers follow
//! base-10 rules with an optional leading sign, booleans are the flags `1`
//! and `0`, and text is accepted as-is.

use crate::error::FieldError;
use crate::models::{DataType, StorageValue};

/// Stateless validator for fixed-width fields
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldValidator;

impl FieldValidator {
    /// Create a new field validator
    pub fn new() -> Self {
        Self
    }

    /// Validate a field against a datatype name from a specification file
    pub fn validate(&self, raw: &str, data_type: &str) -> Result<StorageValue, FieldError> {
        validate(raw, data_type)
    }

    /// Validate a field against a parsed datatype
    pub fn validate_value(
        &self,
        raw: &str,
        data_type: DataType,
    ) -> Result<StorageValue, FieldError> {
        validate_value(raw, data_type)
    }
}

/// Validate `raw` against the datatype named `data_type`
///
/// Fails with [`FieldError::UnknownDataType`] for names outside the closed
/// set before looking at the value.
pub fn validate(raw: &str, data_type: &str) -> Result<StorageValue, FieldError> {
    let data_type = data_type
        .parse::<DataType>()
        .map_err(|_| FieldError::UnknownDataType(data_type.to_string()))?;
    validate_value(raw, data_type)
}

/// Validate `raw` against `data_type`, trimming surrounding whitespace first
pub fn validate_value(raw: &str, data_type: DataType) -> Result<StorageValue, FieldError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(FieldError::EmptyValue);
    }

    match data_type {
        DataType::Integer => value
            .parse::<i32>()
            .map(|parsed| StorageValue::Integer {
                literal: value.to_string(),
                value: parsed,
            })
            .map_err(|_| FieldError::TypeMismatch {
                value: value.to_string(),
                data_type,
            }),
        DataType::Boolean => match value {
            "1" => Ok(StorageValue::Boolean(true)),
            "0" => Ok(StorageValue::Boolean(false)),
            _ => Err(FieldError::TypeMismatch {
                value: value.to_string(),
                data_type,
            }),
        },
        DataType::Text => Ok(StorageValue::Text(value.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_value_rejected_for_every_type() {
        for data_type in DataType::ALL {
            assert_eq!(validate_value("", data_type), Err(FieldError::EmptyValue));
            assert_eq!(validate_value("   ", data_type), Err(FieldError::EmptyValue));
        }
    }

    #[test]
    fn test_integer_keeps_literal_text() {
        let value = validate_value(" 0042 ", DataType::Integer).unwrap();
        assert_eq!(
            value,
            StorageValue::Integer {
                literal: "0042".to_string(),
                value: 42
            }
        );
        assert_eq!(value.to_string(), "0042");

        let value = validate_value("-7", DataType::Integer).unwrap();
        assert_eq!(value.to_string(), "-7");
    }

    #[test]
    fn test_integer_rejects_non_base10() {
        for raw in ["12a", "1.5", "1,000", "0x1F", "- 3", "99999999999"] {
            let err = validate_value(raw, DataType::Integer).unwrap_err();
            assert!(
                matches!(err, FieldError::TypeMismatch { data_type: DataType::Integer, .. }),
                "{raw} should be a type mismatch"
            );
        }
    }

    #[test]
    fn test_boolean_flags() {
        assert_eq!(
            validate_value("1", DataType::Boolean).unwrap().to_string(),
            "true"
        );
        assert_eq!(
            validate_value("0", DataType::Boolean).unwrap().to_string(),
            "false"
        );
        for raw in ["2", "true", "Y", "01", "-1"] {
            assert!(matches!(
                validate_value(raw, DataType::Boolean),
                Err(FieldError::TypeMismatch { .. })
            ));
        }
    }

    #[test]
    fn test_text_is_quoted_and_keeps_interior_whitespace() {
        let value = validate_value("  New York  ", DataType::Text).unwrap();
        assert_eq!(value.to_string(), "'New York'");
    }

    #[test]
    fn test_unknown_datatype_name() {
        assert_eq!(
            validate("12", "DECIMAL"),
            Err(FieldError::UnknownDataType("DECIMAL".to_string()))
        );
        assert_eq!(
            FieldValidator::new().validate("1", "BOOLEAN").unwrap(),
            StorageValue::Boolean(true)
        );
    }
}
