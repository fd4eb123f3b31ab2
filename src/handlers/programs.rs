//! Tuition program HTTP handlers.
//!
//! - POST /api/v1/programs - Create a program (director)
//! - GET /api/v1/programs - List programs
//! - GET /api/v1/programs/{id} - Get one program

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
    models::program::{CreateProgramRequest, Program},
};

/// Create a tuition program.
///
/// # Request Body
///
/// ```json
/// { "program_name": "Caregiving", "tuition_fee_cents": 150000000 }
/// ```
///
/// # Response
///
/// - **Success (201 Created)**: the stored program
/// - **Error (400)**: empty or overlong name, negative fee
/// - **Error (403)**: caller is not a director
pub async fn create_program(
    State(pool): State<DbPool>,
    Extension(auth): Extension<AuthContext>,
    AppJson(request): AppJson<CreateProgramRequest>,
) -> Result<(StatusCode, Json<Program>), AppError> {
    auth.require(DIRECTOR_ONLY)?;
    let program = request.validate()?;

    let program = sqlx::query_as::<_, Program>(
        r#"
        INSERT INTO programs (program_name, tuition_fee_cents)
        VALUES ($1, $2)
        RETURNING id, program_name, tuition_fee_cents, created_at
        "#,
    )
    .bind(&program.program_name)
    .bind(program.tuition_fee_cents)
    .fetch_one(&pool)
    .await?;

    tracing::info!(program_id = %program.id, "program added");

    Ok((StatusCode::CREATED, Json(program)))
}

/// List every program, alphabetically.
pub async fn list_programs(State(pool): State<DbPool>) -> Result<Json<Vec<Program>>, AppError> {
    let programs = sqlx::query_as::<_, Program>(
        "SELECT id, program_name, tuition_fee_cents, created_at FROM programs ORDER BY program_name",
    )
    .fetch_all(&pool)
    .await?;

    Ok(Json(programs))
}

pub async fn get_program(
    State(pool): State<DbPool>,
    Path(program_id): Path<Uuid>,
) -> Result<Json<Program>, AppError> {
    let program = sqlx::query_as::<_, Program>(
        "SELECT id, program_name, tuition_fee_cents, created_at FROM programs WHERE id = $1",
    )
    .bind(program_id)
    .fetch_optional(&pool)
    .await?
    .ok_or(AppError::NotFound("Program not found"))?;

    Ok(Json(program))
}
