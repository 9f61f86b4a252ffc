//! Input validation primitives.

use crate::error::{Error, Result};

/// Require a string to be non-empty after trimming.
///
/// Returns the trimmed string on success; a blank value is a validation
/// error naming the offending key.
pub fn require_non_empty<'a>(key: &str, value: &'a str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(Error::validation_invalid_argument(
            key,
            format!("Input value '{}' cannot be empty", key.trim()),
        ))
    } else {
        Ok(trimmed)
    }
}

/// Require an Option to contain a value.
pub fn require<T>(opt: Option<T>, field: &str, message: &str) -> Result<T> {
    opt.ok_or_else(|| Error::validation_invalid_argument(field, message))
}
