//! Student data models and API request types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::required_text;

/// Where a student stands in their program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StudentStatus {
    Completed,
    Travelled,
    #[default]
    #[serde(alias = "not completed")]
    NotCompleted,
}

impl StudentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StudentStatus::Completed => "completed",
            StudentStatus::Travelled => "travelled",
            StudentStatus::NotCompleted => "not_completed",
        }
    }
}

impl TryFrom<String> for StudentStatus {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "completed" => Ok(StudentStatus::Completed),
            "travelled" => Ok(StudentStatus::Travelled),
            "not_completed" => Ok(StudentStatus::NotCompleted),
            other => Err(format!("unknown student status: {other}")),
        }
    }
}

/// Represents a row of the `students` table.
///
/// # Balance
///
/// `outstanding_balance_cents` starts at the program's tuition fee and drops
/// with every tuition payment. It is `None` while the student has no program.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Student {
    pub id: Uuid,
    pub firstname: String,
    pub lastname: String,
    pub contacts: String,

    #[sqlx(try_from = "String")]
    pub status: StudentStatus,

    pub is_on_loan: bool,
    pub program_id: Option<Uuid>,
    pub outstanding_balance_cents: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for registering a student.
///
/// ```json
/// {
///   "firstname": "Grace",
///   "lastname": "Namuli",
///   "contacts": "0772000000",
///   "program_id": "550e8400-e29b-41d4-a716-446655440000"
/// }
/// ```
#[derive(Debug, Deserialize)]
pub struct CreateStudentRequest {
    pub firstname: String,
    pub lastname: String,
    pub contacts: String,

    #[serde(default)]
    pub status: StudentStatus,

    #[serde(default)]
    pub is_on_loan: bool,

    pub program_id: Option<Uuid>,
}

#[derive(Debug)]
pub struct NewStudent {
    pub firstname: String,
    pub lastname: String,
    pub contacts: String,
    pub status: StudentStatus,
    pub is_on_loan: bool,
    pub program_id: Option<Uuid>,
}

impl CreateStudentRequest {
    pub fn validate(self) -> Result<NewStudent, AppError> {
        Ok(NewStudent {
            firstname: required_text(&self.firstname, 100, "Invalid first name")?,
            lastname: required_text(&self.lastname, 100, "Invalid last name")?,
            contacts: required_text(&self.contacts, 15, "Invalid contacts")?,
            status: self.status,
            is_on_loan: self.is_on_loan,
            program_id: self.program_id,
        })
    }
}

/// Partial update; absent fields keep their stored value.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateStudentRequest {
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub contacts: Option<String>,
    pub status: Option<StudentStatus>,
    pub is_on_loan: Option<bool>,
    pub program_id: Option<Uuid>,
}

impl UpdateStudentRequest {
    /// Validate and trim whichever text fields are present.
    pub fn validate(self) -> Result<Self, AppError> {
        let firstname = self
            .firstname
            .map(|v| required_text(&v, 100, "Invalid first name"))
            .transpose()?;
        let lastname = self
            .lastname
            .map(|v| required_text(&v, 100, "Invalid last name"))
            .transpose()?;
        let contacts = self
            .contacts
            .map(|v| required_text(&v, 15, "Invalid contacts"))
            .transpose()?;

        Ok(Self {
            firstname,
            lastname,
            contacts,
            ..self
        })
    }
}

/// Balance after moving a student to a program: its tuition fee less
/// everything already paid. Negative when payments exceed the new fee.
pub fn outstanding_after_program_change(tuition_fee_cents: i64, total_paid_cents: i64) -> i64 {
    tuition_fee_cents - total_paid_cents
}

/// Query string for `GET /api/v1/students`.
#[derive(Debug, Default, Deserialize)]
pub struct StudentFilter {
    pub status: Option<StudentStatus>,
    pub program_id: Option<Uuid>,
}
