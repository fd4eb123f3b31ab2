//! Student registry HTTP handlers.
//!
//! - POST /api/v1/students - Register a student
//! - GET /api/v1/students - List students, optionally filtered
//! - GET /api/v1/students/{id} - Get one student
//! - PATCH /api/v1/students/{id} - Partial update

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{
    db::DbPool,
    error::AppError,
    extract::AppJson,
    middleware::auth::{AuthContext, REGISTRY_ROLES},
    models::student::{CreateStudentRequest, Student, StudentFilter, UpdateStudentRequest},
    services::student_service,
};

/// Register a student.
///
/// # Request Body
///
/// ```json
/// {
///   "firstname": "Grace",
///   "lastname": "Namuli",
///   "contacts": "0772000000",
///   "status": "not_completed",
///   "is_on_loan": false,
///   "program_id": "550e8400-e29b-41d4-a716-446655440000"
/// }
/// ```
///
/// `status`, `is_on_loan` and `program_id` are optional. With a program the
/// outstanding balance starts at its tuition fee.
///
/// # Response
///
/// - **Success (201 Created)**: the stored student
/// - **Error (400)**: invalid names or contacts
/// - **Error (403)**: caller is neither registrar nor director
/// - **Error (404)**: unknown program
pub async fn create_student(
    State(pool): State<DbPool>,
    Extension(auth): Extension<AuthContext>,
    AppJson(request): AppJson<CreateStudentRequest>,
) -> Result<(StatusCode, Json<Student>), AppError> {
    auth.require(REGISTRY_ROLES)?;
    let student = request.validate()?;

    let student = student_service::create_student(&pool, student).await?;

    Ok((StatusCode::CREATED, Json(student)))
}

/// List students, newest first.
///
/// # Query Parameters
///
/// - `status` - `completed`, `travelled` or `not_completed`
/// - `program_id` - only students enrolled in this program
pub async fn list_students(
    State(pool): State<DbPool>,
    Query(filter): Query<StudentFilter>,
) -> Result<Json<Vec<Student>>, AppError> {
    let students = sqlx::query_as::<_, Student>(
        r#"
        SELECT *
        FROM students
        WHERE ($1::TEXT IS NULL OR status = $1)
          AND ($2::UUID IS NULL OR program_id = $2)
        ORDER BY created_at DESC
        "#,
    )
    .bind(filter.status.map(|s| s.as_str()))
    .bind(filter.program_id)
    .fetch_all(&pool)
    .await?;

    Ok(Json(students))
}

pub async fn get_student(
    State(pool): State<DbPool>,
    Path(student_id): Path<Uuid>,
) -> Result<Json<Student>, AppError> {
    let student = sqlx::query_as::<_, Student>("SELECT * FROM students WHERE id = $1")
        .bind(student_id)
        .fetch_optional(&pool)
        .await?
        .ok_or(AppError::NotFound("Student not found"))?;

    Ok(Json(student))
}

/// Update any subset of a student's fields.
///
/// Changing `program_id` recomputes the outstanding balance as the new
/// tuition fee minus everything already paid.
pub async fn update_student(
    State(pool): State<DbPool>,
    Extension(auth): Extension<AuthContext>,
    Path(student_id): Path<Uuid>,
    AppJson(request): AppJson<UpdateStudentRequest>,
) -> Result<Json<Student>, AppError> {
    auth.require(REGISTRY_ROLES)?;
    let update = request.validate()?;

    let student = student_service::update_student(&pool, student_id, update).await?;

    Ok(Json(student))
}
