//! Input validation helpers
//!
//! Centralized text/amount/quantity limits and validation functions.
//! Limits are chosen based on reasonable UX limits for names and notes;
//! the store itself does not enforce text lengths.

use shared::{AppError, ErrorCode};

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: department, section, item, rule, task, etc.
pub const MAX_NAME_LEN: usize = 200;

/// Department codes (short uppercase identifiers)
pub const MAX_CODE_LEN: usize = 16;

/// Notes, descriptions, reasons (void reason, transfer note, etc.)
pub const MAX_NOTE_LEN: usize = 500;

/// Short identifiers: SKU, staff number, phone, payment reference
pub const MAX_SHORT_TEXT_LEN: usize = 100;

// ── Amount / quantity limits ────────────────────────────────────────

/// Maximum allowed unit price or payment amount
pub const MAX_AMOUNT: f64 = 1_000_000.0;

/// Maximum allowed quantity per order line or transfer
pub const MAX_QUANTITY: i64 = 999_999;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::with_message(
            ErrorCode::RequiredField,
            format!("{field} must not be empty"),
        ));
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

/// Validate a monetary amount: finite, non-negative, within bounds.
pub fn validate_amount(value: f64, field: &str) -> Result<(), AppError> {
    if !value.is_finite() {
        return Err(AppError::validation(format!(
            "{field} must be a finite number, got {value}"
        )));
    }
    if value < 0.0 {
        return Err(AppError::validation(format!(
            "{field} must be non-negative, got {value}"
        )));
    }
    if value > MAX_AMOUNT {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            format!("{field} exceeds maximum allowed ({MAX_AMOUNT}), got {value}"),
        ));
    }
    Ok(())
}

/// Validate a strictly positive monetary amount.
pub fn validate_positive_amount(value: f64, field: &str) -> Result<(), AppError> {
    validate_amount(value, field)?;
    if value <= 0.0 {
        return Err(AppError::validation(format!(
            "{field} must be positive, got {value}"
        )));
    }
    Ok(())
}

/// Validate a strictly positive quantity within bounds.
pub fn validate_quantity(value: i64, field: &str) -> Result<(), AppError> {
    if value <= 0 {
        return Err(AppError::validation(format!(
            "{field} must be positive, got {value}"
        )));
    }
    if value > MAX_QUANTITY {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            format!("{field} exceeds maximum allowed ({MAX_QUANTITY}), got {value}"),
        ));
    }
    Ok(())
}

/// Validate a percentage in (0, 100].
pub fn validate_percentage(value: f64, field: &str) -> Result<(), AppError> {
    if !value.is_finite() || value <= 0.0 || value > 100.0 {
        return Err(AppError::validation(format!(
            "{field} must be between 0 (exclusive) and 100, got {value}"
        )));
    }
    Ok(())
}

/// Normalize a department code: trimmed, uppercased, alphanumeric/underscore.
pub fn normalize_department_code(code: &str) -> Result<String, AppError> {
    let code = code.trim().to_uppercase();
    validate_required_text(&code, "code", MAX_CODE_LEN)?;
    if !code.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(AppError::validation(format!(
            "code may only contain letters, digits and underscores, got '{code}'"
        )));
    }
    Ok(code)
}

/// Normalize an ISO-4217 currency code: trimmed, uppercased, 3 ASCII letters.
pub fn normalize_currency_code(code: &str) -> Result<String, AppError> {
    let code = code.trim().to_uppercase();
    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(AppError::validation(format!(
            "currency must be a 3-letter ISO code, got '{code}'"
        )));
    }
    Ok(code)
}
