//! Per-student fee balances and the payments made against them.
//!
//! A row in `student_fee_balances` is opened when a fee is assigned to a
//! student. Every fee payment raises `amount_paid_cents` and lowers
//! `balance_remaining_cents` by the same amount, so
//! `total_fee = amount_paid + balance_remaining` always holds.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::positive_cents;

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct FeeBalance {
    pub id: Uuid,
    pub student_id: Uuid,
    pub fee_id: Uuid,
    pub total_fee_cents: i64,
    pub amount_paid_cents: i64,
    pub balance_remaining_cents: i64,
}

/// One line of `GET /api/v1/students/{id}/balance`.
#[derive(Debug, sqlx::FromRow, Serialize)]
pub struct FeeBalanceLine {
    pub fee_id: Uuid,
    pub fee_name: String,
    pub total_fee_cents: i64,
    pub amount_paid_cents: i64,
    pub balance_remaining_cents: i64,
}

/// Body of `POST /api/v1/students/{id}/fees`.
#[derive(Debug, Deserialize)]
pub struct AssignFeeRequest {
    pub fee_id: Uuid,
}

/// Row of the `fee_payments` table.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct FeePayment {
    pub id: Uuid,
    pub student_id: Uuid,
    pub fee_id: Uuid,
    pub payment_amount_cents: i64,
    pub payment_date: NaiveDate,
    pub payment_method: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// One line of the fee payment history, joined with the fee name.
#[derive(Debug, sqlx::FromRow, Serialize)]
pub struct FeePaymentLine {
    pub id: Uuid,
    pub fee_name: String,
    pub payment_amount_cents: i64,
    pub payment_date: NaiveDate,
    pub payment_method: Option<String>,
}

/// Request to pay towards an assigned fee.
///
/// ```json
/// {
///   "fee_id": "550e8400-e29b-41d4-a716-446655440000",
///   "payment_amount_cents": 2500000,
///   "payment_date": "2025-03-01",
///   "payment_method": "cash"
/// }
/// ```
#[derive(Debug, Deserialize)]
pub struct CreateFeePaymentRequest {
    pub fee_id: Uuid,
    pub payment_amount_cents: i64,
    pub payment_date: NaiveDate,
    pub payment_method: Option<String>,
}

impl CreateFeePaymentRequest {
    pub fn validate(self) -> Result<Self, AppError> {
        positive_cents(self.payment_amount_cents, "Amount must be a positive number")?;
        if self
            .payment_method
            .as_deref()
            .is_some_and(|m| m.chars().count() > 255)
        {
            return Err(AppError::InvalidRequest(
                "Payment method is too long".to_string(),
            ));
        }
        Ok(self)
    }
}

#[derive(Debug, Serialize)]
pub struct FeePaymentResponse {
    pub message: &'static str,
    pub payment: FeePayment,
    pub balance: FeeBalance,
}

impl FeeBalance {
    /// Balance after applying `amount_cents`, or `Overpayment` if it does not fit.
    pub fn apply_payment(&self, amount_cents: i64) -> Result<(i64, i64), AppError> {
        if amount_cents > self.balance_remaining_cents {
            return Err(AppError::Overpayment);
        }
        Ok((
            self.amount_paid_cents + amount_cents,
            self.balance_remaining_cents - amount_cents,
        ))
    }
}
