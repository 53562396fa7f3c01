//! Field checks shared by the post and comment input types.

use crate::error::DomainError;

use super::{AUTHOR_MAX_LEN, DEFAULT_AUTHOR};

/// A required text field: must contain something other than whitespace.
pub(crate) fn required(
    field: &str,
    value: String,
    max_len: Option<usize>,
) -> Result<String, DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::Validation(format!("{field} must not be empty")));
    }
    within_limit(field, &value, max_len)?;
    Ok(value)
}

/// An optional text field. Blank values collapse to `None`.
pub(crate) fn optional(
    field: &str,
    value: Option<String>,
    max_len: usize,
) -> Result<Option<String>, DomainError> {
    match value {
        Some(v) if !v.trim().is_empty() => {
            within_limit(field, &v, Some(max_len))?;
            Ok(Some(v))
        }
        _ => Ok(None),
    }
}

pub(crate) fn author_or_default(author: Option<String>) -> Result<String, DomainError> {
    Ok(optional("author", author, AUTHOR_MAX_LEN)?.unwrap_or_else(|| DEFAULT_AUTHOR.to_string()))
}

fn within_limit(field: &str, value: &str, max_len: Option<usize>) -> Result<(), DomainError> {
    match max_len {
        Some(max) if value.chars().count() > max => Err(DomainError::Validation(format!(
            "{field} must be at most {max} characters"
        ))),
        _ => Ok(()),
    }
}
