//! Per-student fee balance and fee payment HTTP handlers.
//!
//! - POST /api/v1/students/{id}/fees - Assign a fee to a student
//! - GET /api/v1/students/{id}/balance - Balance per assigned fee
//! - POST /api/v1/students/{id}/fee-payments - Pay towards an assigned fee
//! - GET /api/v1/students/{id}/fee-payments - Fee payment history

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
    middleware::auth::{AuthContext, FINANCE_ROLES, REGISTRY_ROLES},
    models::fee_balance::{
        AssignFeeRequest, CreateFeePaymentRequest, FeeBalance, FeeBalanceLine, FeePaymentLine,
        FeePaymentResponse,
    },
    services::payment_service,
};

/// Assign a fee to a student, opening a balance equal to the fee amount.
///
/// Returns 201 with the new balance row, 404 for an unknown student or fee,
/// 409 if the fee is already assigned.
pub async fn assign_fee(
    State(pool): State<DbPool>,
    Extension(auth): Extension<AuthContext>,
    Path(student_id): Path<Uuid>,
    AppJson(request): AppJson<AssignFeeRequest>,
) -> Result<(StatusCode, Json<FeeBalance>), AppError> {
    auth.require(REGISTRY_ROLES)?;

    let balance = payment_service::assign_fee(&pool, student_id, request.fee_id).await?;

    Ok((StatusCode::CREATED, Json(balance)))
}

/// Balance per assigned fee.
///
/// ```json
/// [
///   {
///     "fee_id": "...",
///     "fee_name": "Uniform",
///     "total_fee_cents": 8000000,
///     "amount_paid_cents": 3000000,
///     "balance_remaining_cents": 5000000
///   }
/// ]
/// ```
pub async fn get_balance(
    State(pool): State<DbPool>,
    Path(student_id): Path<Uuid>,
) -> Result<Json<Vec<FeeBalanceLine>>, AppError> {
    let lines = sqlx::query_as::<_, FeeBalanceLine>(
        r#"
        SELECT f.id AS fee_id,
               f.fee_name,
               sfb.total_fee_cents,
               sfb.amount_paid_cents,
               sfb.balance_remaining_cents
        FROM student_fee_balances sfb
        JOIN fees f ON sfb.fee_id = f.id
        WHERE sfb.student_id = $1
        ORDER BY f.fee_name
        "#,
    )
    .bind(student_id)
    .fetch_all(&pool)
    .await?;

    Ok(Json(lines))
}

/// Pay towards an assigned fee.
///
/// # Response
///
/// - **Success (201 Created)**:
///   `{"message": "Payment recorded and balance updated", "payment": {...}, "balance": {...}}`
/// - **Error (404)**: fee not assigned to the student
/// - **Error (422)**: amount exceeds the remaining balance
pub async fn create_fee_payment(
    State(pool): State<DbPool>,
    Extension(auth): Extension<AuthContext>,
    Path(student_id): Path<Uuid>,
    AppJson(request): AppJson<CreateFeePaymentRequest>,
) -> Result<(StatusCode, Json<FeePaymentResponse>), AppError> {
    auth.require(FINANCE_ROLES)?;
    let request = request.validate()?;

    let (payment, balance) =
        payment_service::record_fee_payment(&pool, student_id, request).await?;

    Ok((
        StatusCode::CREATED,
        Json(FeePaymentResponse {
            message: "Payment recorded and balance updated",
            payment,
            balance,
        }),
    ))
}

/// Fee payment history with fee names, oldest first.
pub async fn list_fee_payments(
    State(pool): State<DbPool>,
    Path(student_id): Path<Uuid>,
) -> Result<Json<Vec<FeePaymentLine>>, AppError> {
    let lines = sqlx::query_as::<_, FeePaymentLine>(
        r#"
        SELECT fp.id, f.fee_name, fp.payment_amount_cents, fp.payment_date, fp.payment_method
        FROM fee_payments fp
        JOIN fees f ON fp.fee_id = f.id
        WHERE fp.student_id = $1
        ORDER BY fp.payment_date, fp.created_at
        "#,
    )
    .bind(student_id)
    .fetch_all(&pool)
    .await?;

    Ok(Json(lines))
}
