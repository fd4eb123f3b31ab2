//! Error types and HTTP error response handling.
//!
//! This module defines all application errors and how they are converted
//! into HTTP responses with appropriate status codes and JSON bodies.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Application-wide error type.
///
/// Each variant maps to a specific HTTP status code and error code.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Database operation failed (e.g., connection error, query error).
    ///
    /// Returns HTTP 500; the details are logged, never sent to the client.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Bearer token is missing, malformed, expired or badly signed.
    ///
    /// Returns HTTP 401 Unauthorized.
    #[error("Invalid or missing token")]
    InvalidToken,

    /// Login with an unknown user/role pair or a wrong password.
    ///
    /// Returns HTTP 401 Unauthorized.
    #[error("Invalid user ID, role or password")]
    InvalidCredentials,

    /// Authenticated, but the role may not perform this operation.
    ///
    /// Returns HTTP 403 Forbidden.
    #[error("Role is not allowed to perform this operation")]
    Forbidden,

    /// Requested record does not exist. The string names what was missing.
    ///
    /// Returns HTTP 404 Not Found.
    #[error("{0}")]
    NotFound(&'static str),

    /// No route matches the request path.
    #[error("Route not found")]
    RouteNotFound,

    /// Request body or parameters are invalid.
    ///
    /// Returns HTTP 400 Bad Request.
    #[error("{0}")]
    InvalidRequest(String),

    /// Record already exists (unique key violation).
    ///
    /// Returns HTTP 409 Conflict.
    #[error("{0}")]
    Conflict(String),

    /// Payment larger than the balance it is applied to.
    ///
    /// Returns HTTP 422 Unprocessable Entity.
    #[error("Payment exceeds the remaining balance")]
    Overpayment,

    /// Failure outside the database: password hashing, token signing,
    /// blocking task join.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON body rejections (syntax, content type, field types) are bad requests.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidRequest(rejection.body_text())
    }
}

impl AppError {
    /// Translate constraint violations into client errors.
    ///
    /// Unique violations become 409 with `conflict_message`, foreign key
    /// violations become 400. Anything else stays a database error.
    pub fn from_constraint(err: sqlx::Error, conflict_message: &str) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return AppError::Conflict(conflict_message.to_string());
            }
            if db_err.is_foreign_key_violation() {
                return AppError::InvalidRequest(
                    "Referenced record does not exist".to_string(),
                );
            }
        }
        AppError::Database(err)
    }

    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::InvalidToken => (StatusCode::UNAUTHORIZED, "invalid_token"),
            AppError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "invalid_credentials"),
            AppError::Forbidden => (StatusCode::FORBIDDEN, "forbidden"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            AppError::RouteNotFound => (StatusCode::NOT_FOUND, "route_not_found"),
            AppError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "invalid_request"),
            AppError::Conflict(_) => (StatusCode::CONFLICT, "conflict"),
            AppError::Overpayment => (StatusCode::UNPROCESSABLE_ENTITY, "overpayment"),
            AppError::Database(_) | AppError::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
            }
        }
    }
}

/// Convert AppError into an HTTP response.
///
/// # Response Format
///
/// All errors return JSON in this format:
/// ```json
/// {
///   "error": {
///     "code": "error_type",
///     "message": "Human-readable error message"
///   }
/// }
/// ```
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "request failed");
            "An internal error occurred".to_string()
        } else {
            self.to_string()
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
