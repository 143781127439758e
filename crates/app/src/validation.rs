//! Form validation

use thiserror::Error;

/// A form field failed validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field was blank.
    #[error("{0} is required")]
    Required(&'static str),

    /// An email field does not hold an email address.
    #[error("{0} is not a valid email address")]
    InvalidEmail(&'static str),

    /// A quantity field is below one.
    #[error("{0} must be at least 1")]
    InvalidQuantity(&'static str),
}

/// Trim a required field.
///
/// # Errors
///
/// Returns [`ValidationError::Required`] if `value` is blank.
pub fn required(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::Required(field));
    }

    Ok(trimmed.to_owned())
}

/// Trim an optional field, mapping blank to `None`.
pub fn optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
}

/// Trim and check a required email field.
///
/// # Errors
///
/// - [`ValidationError::Required`]: `value` is blank.
/// - [`ValidationError::InvalidEmail`]: `value` is not an email address.
pub fn email(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let value = required(field, value)?;

    if !validator::validate_email(&value) {
        return Err(ValidationError::InvalidEmail(field));
    }

    Ok(value)
}

/// Check that a quantity is at least one.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidQuantity`] when `value` is below one.
pub fn positive(field: &'static str, value: i64) -> Result<u32, ValidationError> {
    u32::try_from(value)
        .ok()
        .filter(|value| *value >= 1)
        .ok_or(ValidationError::InvalidQuantity(field))
}
