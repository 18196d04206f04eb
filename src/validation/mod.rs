//! Field validation
//!
//! Converts raw fixed-width fields into storage-ready values.

pub mod field;

pub use field::{FieldValidator, validate, validate_value};
