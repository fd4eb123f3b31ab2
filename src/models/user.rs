//! Staff user model and login request/response types.
//!
//! Staff log in with their staff number, role and password. Passwords are
//! stored as Argon2 PHC strings only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use super::integer_value;
use crate::error::AppError;

/// Office role carried by every staff account and every token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Registrar,
    Finance,
    Director,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Registrar => "registrar",
            Role::Finance => "finance",
            Role::Director => "director",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Role {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "registrar" => Ok(Role::Registrar),
            "finance" => Ok(Role::Finance),
            "director" => Ok(Role::Director),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// Represents a row of the `users` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    /// Staff number, chosen by the office (e.g. 25291)
    pub user_id: i32,

    #[sqlx(try_from = "String")]
    pub role: Role,

    /// Argon2 PHC string, never serialized
    pub hashed_password: String,

    pub created_at: DateTime<Utc>,
}

/// Request body for `POST /api/v1/users`.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub user_id: i32,
    pub role: Role,
    pub password: String,
}

pub const MIN_PASSWORD_CHARS: usize = 4;

impl CreateUserRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.user_id <= 0 {
            return Err(AppError::InvalidRequest(
                "User ID must be a positive number".to_string(),
            ));
        }
        if self.password.chars().count() < MIN_PASSWORD_CHARS {
            return Err(AppError::InvalidRequest(format!(
                "Password must be at least {MIN_PASSWORD_CHARS} characters"
            )));
        }
        Ok(())
    }
}

/// User as returned to clients (no password hash).
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub user_id: i32,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            user_id: user.user_id,
            role: user.role,
            created_at: user.created_at,
        }
    }
}

/// Request body for `POST /api/v1/login`.
///
/// Every field is optional at the serde level so that a missing field yields
/// the 400 "All fields are required" response instead of a JSON rejection.
/// The role stays a string: an unknown role is a failed login, not a bad request.
/// `user_id` may arrive as a number or a numeric string.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub user_id: Option<Value>,
    pub password: Option<String>,
    pub role: Option<String>,
}

/// Login attempt with every field present.
#[derive(Debug)]
pub struct Credentials {
    pub user_id: i32,
    pub password: String,
    pub role: String,
}

impl LoginRequest {
    /// Missing or blank fields are a 400. A staff number that is present but
    /// not an integer can never match an account, so it fails as a login.
    pub fn into_credentials(self) -> Result<Credentials, AppError> {
        let user_id = self.user_id.filter(|id| !is_blank(id));
        match (user_id, self.password, self.role) {
            (Some(user_id), Some(password), Some(role))
                if !password.is_empty() && !role.is_empty() =>
            {
                let user_id = integer_value(&user_id)
                    .and_then(|id| i32::try_from(id).ok())
                    .ok_or(AppError::InvalidCredentials)?;
                Ok(Credentials {
                    user_id,
                    password,
                    role,
                })
            }
            _ => Err(AppError::InvalidRequest(
                "All fields are required".to_string(),
            )),
        }
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.trim().is_empty(),
        Value::Number(number) => number.as_i64() == Some(0),
        _ => false,
    }
}

/// Successful login response.
///
/// ```json
/// { "success": true, "token": "eyJ...", "expires_in": 3600 }
/// ```
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub token: String,
    pub expires_in: i64,
}
