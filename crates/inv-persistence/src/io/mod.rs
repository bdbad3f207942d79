//! File I/O operations for the file-backed store.
//!
//! This module handles:
//! - Writing values with atomic writes
//! - Reading values that may not exist yet

mod load;
mod save;

pub use load::read_if_exists;
pub use save::write_atomic;
