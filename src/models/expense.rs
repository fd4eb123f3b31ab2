//! Office expense ledger models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::integer_value;
use crate::error::AppError;

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Expense {
    pub id: Uuid,
    pub person_name: String,
    pub amount_cents: i64,
    pub expense_date: NaiveDate,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// Request body for `POST /api/v1/expenses`.
///
/// Fields are raw JSON values so a wrong type gets the same field message as
/// a bad value instead of a generic JSON rejection. `amount_cents` may be a
/// number or a numeric string.
#[derive(Debug, Deserialize)]
pub struct CreateExpenseRequest {
    pub person_name: Option<Value>,
    pub amount_cents: Option<Value>,
    pub expense_date: Option<Value>,
    pub description: Option<Value>,
}

#[derive(Debug, PartialEq)]
pub struct NewExpense {
    pub person_name: String,
    pub amount_cents: i64,
    pub expense_date: NaiveDate,
    pub description: String,
}

impl CreateExpenseRequest {
    /// Checks run in a fixed order: name, amount, date.
    pub fn validate(self) -> Result<NewExpense, AppError> {
        let person_name = match self.person_name.as_ref().and_then(Value::as_str).map(str::trim) {
            Some(name) if !name.is_empty() && name.chars().count() <= 100 => name.to_string(),
            _ => return Err(AppError::InvalidRequest("Invalid person name".to_string())),
        };

        let amount_cents = match self.amount_cents.as_ref().and_then(integer_value) {
            Some(amount) if amount > 0 => amount,
            _ => {
                return Err(AppError::InvalidRequest(
                    "Amount must be a positive number".to_string(),
                ));
            }
        };

        let expense_date = self
            .expense_date
            .as_ref()
            .and_then(Value::as_str)
            .and_then(|d| NaiveDate::parse_from_str(d.trim(), "%Y-%m-%d").ok())
            .ok_or_else(|| AppError::InvalidRequest("Invalid expense date".to_string()))?;

        let description = match self.description {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(text)) => text,
            Some(_) => {
                return Err(AppError::InvalidRequest(
                    "Description must be text".to_string(),
                ));
            }
        };

        Ok(NewExpense {
            person_name,
            amount_cents,
            expense_date,
            description,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct CreateExpenseResponse {
    pub message: &'static str,
    pub id: Uuid,
}

/// Query string for `GET /api/v1/expenses`.
///
/// The range applies only when both ends are present.
#[derive(Debug, Default, Deserialize)]
pub struct ExpenseFilter {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl ExpenseFilter {
    pub fn range(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.start_date.zip(self.end_date)
    }
}
