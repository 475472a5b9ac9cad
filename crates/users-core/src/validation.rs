//! Validation utilities.

use crate::UsersError;
use validator::{Validate, ValidationErrors};

/// Extension trait for validation.
pub trait ValidateExt: Validate {
    /// Validates the struct and returns a `UsersError` on failure.
    fn validate_request(&self) -> Result<(), UsersError> {
        self.validate().map_err(validation_errors_to_users_error)
    }
}

impl<T: Validate> ValidateExt for T {}

/// Converts `validator::ValidationErrors` to `UsersError`.
///
/// Field errors are flattened into a single `field: message` list, sorted by
/// field name so the message is stable.
#[must_use]
pub fn validation_errors_to_users_error(errors: ValidationErrors) -> UsersError {
    let mut parts: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                let message = error
                    .message
                    .as_ref()
                    .map_or_else(|| error.code.to_string(), |m| m.to_string());
                format!("{}: {}", field, message)
            })
        })
        .collect();
    parts.sort();

    UsersError::Validation(parts.join("; "))
}
