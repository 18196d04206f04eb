//! CLI module for the fwl binary

pub mod commands;
pub mod error;
pub mod output;

pub use error::CliError;
