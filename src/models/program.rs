//! Tuition program model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::required_text;

/// Represents a row of the `programs` table.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Program {
    pub id: Uuid,
    pub program_name: String,

    /// Full tuition for the program, in cents
    pub tuition_fee_cents: i64,

    pub created_at: DateTime<Utc>,
}

/// Request body for creating a program.
///
/// ```json
/// { "program_name": "Caregiving", "tuition_fee_cents": 150000000 }
/// ```
#[derive(Debug, Deserialize)]
pub struct CreateProgramRequest {
    pub program_name: String,
    pub tuition_fee_cents: i64,
}

/// Program fields after validation.
#[derive(Debug)]
pub struct NewProgram {
    pub program_name: String,
    pub tuition_fee_cents: i64,
}

impl CreateProgramRequest {
    pub fn validate(self) -> Result<NewProgram, AppError> {
        let program_name = required_text(&self.program_name, 100, "Invalid program name")?;
        if self.tuition_fee_cents < 0 {
            return Err(AppError::InvalidRequest(
                "Tuition fee cannot be negative".to_string(),
            ));
        }
        Ok(NewProgram {
            program_name,
            tuition_fee_cents: self.tuition_fee_cents,
        })
    }
}
