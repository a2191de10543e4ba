//! Form-level checks run before a user action is accepted.
//!
//! Failures are returned as [`CoreError::Validation`] carrying the message
//! shown to the user; the caller decides how to surface it.

use crate::error::CoreError;

/// Require at least one selected `what` (e.g. "procedure", "recipient").
pub fn require_selection(count: usize, what: &str) -> Result<(), CoreError> {
    if count == 0 {
        Err(CoreError::Validation(format!("Select at least one {what}")))
    } else {
        Ok(())
    }
}

/// Require every `(label, value)` pair to have a non-blank value.
///
/// The error lists all missing labels in input order.
pub fn require_fields(fields: &[(&str, &str)]) -> Result<(), CoreError> {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(label, _)| *label)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Fill in the required fields: {}",
            missing.join(", ")
        )))
    }
}
