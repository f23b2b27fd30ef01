//! Input validation helpers
//!
//! Centralized text length constants and validation functions. Limits are
//! reasonable UX bounds for names, phone numbers and addresses; the storage
//! layer does not enforce lengths on its own.

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Receiver and sender display names
pub const MAX_NAME_LEN: usize = 200;

/// Short identifiers: phone numbers and similar
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Postal addresses and status-change locations
pub const MAX_ADDRESS_LEN: usize = 500;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

/// Validate shipment weight: finite and strictly positive (kilograms).
pub fn validate_weight(weight: f64) -> Result<(), AppError> {
    if !weight.is_finite() || weight <= 0.0 {
        return Err(AppError::validation("Invalid weight value."));
    }
    Ok(())
}
