//! Staff account management. Director only.

use axum::{Extension, Json, extract::State, http::StatusCode};

use crate::{
    db::DbPool,
    error::AppError,
    extract::AppJson,
    middleware::auth::{AuthContext, DIRECTOR_ONLY},
    models::user::{CreateUserRequest, User, UserResponse},
    services::user_service,
};

/// Create a staff account.
///
/// # Endpoint
///
/// `POST /api/v1/users`
///
/// ```json
/// { "user_id": 25292, "role": "finance", "password": "..." }
/// ```
///
/// Returns 201 with `{user_id, role, created_at}`; 409 if the staff number exists.
pub async fn create_user(
    State(pool): State<DbPool>,
    Extension(auth): Extension<AuthContext>,
    AppJson(request): AppJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    auth.require(DIRECTOR_ONLY)?;

    let user = user_service::create_user(&pool, request).await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// List staff accounts ordered by staff number. Hashes are never returned.
pub async fn list_users(
    State(pool): State<DbPool>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    auth.require(DIRECTOR_ONLY)?;

    let users = sqlx::query_as::<_, User>(
        "SELECT user_id, role, hashed_password, created_at FROM users ORDER BY user_id",
    )
    .fetch_all(&pool)
    .await?;

    Ok(Json(users.into_iter().map(Into::into).collect()))
}
