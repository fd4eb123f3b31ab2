//! Fee catalogue HTTP handlers.

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
    middleware::auth::{AuthContext, DIRECTOR_ONLY},
    models::fee::{CreateFeeRequest, Fee},
};

/// Define a new fee.
///
/// `POST /api/v1/fees` with `{"fee_name": "Uniform", "fee_amount_cents": 8000000}`.
/// Director only. Returns 201 with the fee.
pub async fn create_fee(
    State(pool): State<DbPool>,
    Extension(auth): Extension<AuthContext>,
    AppJson(request): AppJson<CreateFeeRequest>,
) -> Result<(StatusCode, Json<Fee>), AppError> {
    auth.require(DIRECTOR_ONLY)?;
    let fee = request.validate()?;

    let fee = sqlx::query_as::<_, Fee>(
        r#"
        INSERT INTO fees (fee_name, fee_amount_cents)
        VALUES ($1, $2)
        RETURNING *
        "#,
    )
    .bind(&fee.fee_name)
    .bind(fee.fee_amount_cents)
    .fetch_one(&pool)
    .await?;

    tracing::info!(fee_id = %fee.id, "fee added");

    Ok((StatusCode::CREATED, Json(fee)))
}

pub async fn list_fees(State(pool): State<DbPool>) -> Result<Json<Vec<Fee>>, AppError> {
    let fees = sqlx::query_as::<_, Fee>("SELECT * FROM fees ORDER BY fee_name")
        .fetch_all(&pool)
        .await?;

    Ok(Json(fees))
}

pub async fn get_fee(
    State(pool): State<DbPool>,
    Path(fee_id): Path<Uuid>,
) -> Result<Json<Fee>, AppError> {
    let fee = sqlx::query_as::<_, Fee>("SELECT * FROM fees WHERE id = $1")
        .bind(fee_id)
        .fetch_optional(&pool)
        .await?
        .ok_or(AppError::NotFound("Fee not found"))?;

    Ok(Json(fee))
}
