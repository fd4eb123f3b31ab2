//! Tuition payment models.
//!
//! This module defines:
//! - `Payment`: a row of the `payments` table
//! - `CreatePaymentRequest`: body for recording a tuition payment
//! - `TuitionStatement`: tuition fee versus total paid for one student

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::positive_cents;

/// Represents a tuition payment record from the database.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Payment {
    pub id: Uuid,
    pub student_id: Uuid,
    pub amount_paid_cents: i64,
    pub payment_date: NaiveDate,
    pub payment_method: Option<String>,

    /// Set when the payment was made against a specific fee
    pub fee_id: Option<Uuid>,

    pub created_at: DateTime<Utc>,
}

/// Request to record a tuition payment.
///
/// ```json
/// {
///   "amount_paid_cents": 50000000,
///   "payment_date": "2025-02-14",
///   "payment_method": "mobile money"
/// }
/// ```
#[derive(Debug, Deserialize)]
pub struct CreatePaymentRequest {
    pub amount_paid_cents: i64,
    pub payment_date: NaiveDate,
    pub payment_method: Option<String>,
    pub fee_id: Option<Uuid>,
}

impl CreatePaymentRequest {
    pub fn validate(self) -> Result<Self, AppError> {
        positive_cents(self.amount_paid_cents, "Amount must be a positive number")?;
        if self
            .payment_method
            .as_deref()
            .is_some_and(|m| m.chars().count() > 50)
        {
            return Err(AppError::InvalidRequest(
                "Payment method is too long".to_string(),
            ));
        }
        Ok(self)
    }
}

/// A tuition payment may not exceed the outstanding balance. A student with
/// no balance (not enrolled in a program) is not checked.
pub fn check_tuition_payment(outstanding_cents: Option<i64>, amount_cents: i64) -> Result<(), AppError> {
    match outstanding_cents {
        Some(balance) if amount_cents > balance => Err(AppError::Overpayment),
        _ => Ok(()),
    }
}

/// Raw statement figures as selected from the database.
#[derive(Debug, sqlx::FromRow)]
pub struct StatementRow {
    pub student_id: Uuid,
    pub program_name: Option<String>,
    pub tuition_fee_cents: Option<i64>,
    pub total_paid_cents: i64,
}

/// Tuition statement for one student.
///
/// `balance_cents` is `tuition_fee - total_paid`, or `None` when the
/// student is not enrolled in a program.
#[derive(Debug, PartialEq, Serialize)]
pub struct TuitionStatement {
    pub student_id: Uuid,
    pub program_name: Option<String>,
    pub tuition_fee_cents: Option<i64>,
    pub total_paid_cents: i64,
    pub balance_cents: Option<i64>,
}

impl From<StatementRow> for TuitionStatement {
    fn from(row: StatementRow) -> Self {
        Self {
            balance_cents: row.tuition_fee_cents.map(|fee| fee - row.total_paid_cents),
            student_id: row.student_id,
            program_name: row.program_name,
            tuition_fee_cents: row.tuition_fee_cents,
            total_paid_cents: row.total_paid_cents,
        }
    }
}
