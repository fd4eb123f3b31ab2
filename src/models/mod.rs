//! Data models representing database entities.
//!
//! This module contains all data structures that map to database tables,
//! plus the request/response bodies built from them.

use serde_json::Value;

use crate::error::AppError;

/// Expense ledger model
pub mod expense;
/// Per-student fee balances and fee payments
pub mod fee_balance;
/// Fee catalogue model
pub mod fee;
/// Tuition payment model
pub mod payment;
/// Tuition program model
pub mod program;
/// Student model
pub mod student;
/// Staff user and role model
pub mod user;

/// Trim `value` and check it is non-empty and at most `max_chars` long.
pub(crate) fn required_text(value: &str, max_chars: usize, message: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.chars().count() > max_chars {
        return Err(AppError::InvalidRequest(message.to_string()));
    }
    Ok(trimmed.to_string())
}

/// Reject zero and negative amounts.
pub(crate) fn positive_cents(amount_cents: i64, message: &str) -> Result<i64, AppError> {
    if amount_cents <= 0 {
        return Err(AppError::InvalidRequest(message.to_string()));
    }
    Ok(amount_cents)
}

/// Integer sent either as a JSON number or as a numeric string.
pub(crate) fn integer_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}
