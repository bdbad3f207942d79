//! Form field checks applied by front ends before calling the inventory.

use crate::error::{ModelError, Result};

/// Reject values that are empty once surrounding whitespace is removed.
pub fn require_non_empty<'a>(field: &'static str, value: &'a str) -> Result<&'a str> {
    if value.trim().is_empty() {
        return Err(ModelError::EmptyField(field));
    }
    Ok(value)
}
