//! Fee catalogue model.
//!
//! A fee (registration, uniform, exam) is defined once and then assigned to
//! individual students, see [`crate::models::fee_balance`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{positive_cents, required_text};

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Fee {
    pub id: Uuid,
    pub fee_name: String,
    pub fee_amount_cents: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateFeeRequest {
    pub fee_name: String,
    pub fee_amount_cents: i64,
}

#[derive(Debug)]
pub struct NewFee {
    pub fee_name: String,
    pub fee_amount_cents: i64,
}

impl CreateFeeRequest {
    pub fn validate(self) -> Result<NewFee, AppError> {
        Ok(NewFee {
            fee_name: required_text(&self.fee_name, 50, "Invalid fee name")?,
            fee_amount_cents: positive_cents(
                self.fee_amount_cents,
                "Fee amount must be a positive number",
            )?,
        })
    }
}
