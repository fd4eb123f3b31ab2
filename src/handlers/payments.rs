//! Tuition payment HTTP handlers.
//!
//! - POST /api/v1/students/{id}/payments - Record a tuition payment
//! - GET /api/v1/students/{id}/payments - Payment history
//! - GET /api/v1/students/{id}/statement - Tuition fee minus total paid

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{
    db::DbPool,
    error::AppError,
    extract::AppJson,
    middleware::auth::{AuthContext, FINANCE_ROLES},
    models::payment::{CreatePaymentRequest, Payment, TuitionStatement},
    services::payment_service,
};

/// Record a tuition payment.
///
/// # Request Body
///
/// ```json
/// {
///   "amount_paid_cents": 50000000,
///   "payment_date": "2025-02-14",
///   "payment_method": "bank",
///   "fee_id": null
/// }
/// ```
///
/// # Response
///
/// - **Success (201 Created)**: the payment record
/// - **Error (403)**: caller is neither finance nor director
/// - **Error (404)**: unknown student
/// - **Error (422)**: amount exceeds the outstanding balance
pub async fn create_payment(
    State(pool): State<DbPool>,
    Extension(auth): Extension<AuthContext>,
    Path(student_id): Path<Uuid>,
    AppJson(request): AppJson<CreatePaymentRequest>,
) -> Result<(StatusCode, Json<Payment>), AppError> {
    auth.require(FINANCE_ROLES)?;
    let request = request.validate()?;

    let payment = payment_service::record_tuition_payment(&pool, student_id, request).await?;

    Ok((StatusCode::CREATED, Json(payment)))
}

/// Tuition payments for one student, oldest first.
///
/// Returns 404 when the student has no payments at all.
pub async fn list_payments(
    State(pool): State<DbPool>,
    Path(student_id): Path<Uuid>,
) -> Result<Json<Vec<Payment>>, AppError> {
    let payments = sqlx::query_as::<_, Payment>(
        "SELECT * FROM payments WHERE student_id = $1 ORDER BY payment_date, created_at",
    )
    .bind(student_id)
    .fetch_all(&pool)
    .await?;

    if payments.is_empty() {
        return Err(AppError::NotFound("No payments found for this student"));
    }

    Ok(Json(payments))
}

/// Tuition statement.
///
/// ```json
/// {
///   "student_id": "...",
///   "program_name": "Caregiving",
///   "tuition_fee_cents": 150000000,
///   "total_paid_cents": 50000000,
///   "balance_cents": 100000000
/// }
/// ```
pub async fn get_statement(
    State(pool): State<DbPool>,
    Path(student_id): Path<Uuid>,
) -> Result<Json<TuitionStatement>, AppError> {
    let statement = payment_service::tuition_statement(&pool, student_id).await?;

    Ok(Json(statement))
}
