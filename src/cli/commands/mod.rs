//! CLI command handlers

pub mod count;
pub mod load;

pub use count::{CountArgs, handle_count};
pub use load::{LoadArgs, LoadResult, handle_load};
