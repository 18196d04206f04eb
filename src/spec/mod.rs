//! Specification files
//!
//! A specification file `<table>.csv` describes the fixed-width layout of the
//! data files destined for `<table>`.

pub mod loader;

pub use loader::{SPEC_EXTENSION, SpecificationLoader, parse_spec};
