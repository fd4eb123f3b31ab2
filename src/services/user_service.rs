//! Staff accounts: creation, login, and the startup director seed.

use crate::{
    db::DbPool,
    error::AppError,
    models::user::{CreateUserRequest, Credentials, LoginResponse, Role, User},
    services::{password, token::TokenKeys},
};

/// Create a staff account with a hashed password.
///
/// # Errors
///
/// - `InvalidRequest`: non-positive id or short password
/// - `Conflict`: the staff number is taken
pub async fn create_user(pool: &DbPool, request: CreateUserRequest) -> Result<User, AppError> {
    request.validate()?;

    let hashed_password = password::hash_password_blocking(request.password).await?;

    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (user_id, role, hashed_password)
        VALUES ($1, $2, $3)
        RETURNING *
        "#,
    )
    .bind(request.user_id)
    .bind(request.role.as_str())
    .bind(&hashed_password)
    .fetch_one(pool)
    .await
    .map_err(|e| AppError::from_constraint(e, "User already exists"))?;

    tracing::info!(user_id = user.user_id, role = %user.role, "user created");

    Ok(user)
}

/// Check a login attempt and sign a token for it.
///
/// An unknown role, an unknown user/role pair and a wrong password all
/// produce the same `InvalidCredentials` error.
pub async fn authenticate(
    pool: &DbPool,
    keys: &TokenKeys,
    credentials: Credentials,
) -> Result<LoginResponse, AppError> {
    let Credentials {
        user_id,
        password,
        role,
    } = credentials;

    let Ok(role) = Role::try_from(role) else {
        tracing::warn!(user_id, "login with unknown role");
        return Err(AppError::InvalidCredentials);
    };

    let user = sqlx::query_as::<_, User>(
        "SELECT user_id, role, hashed_password, created_at FROM users WHERE user_id = $1 AND role = $2",
    )
    .bind(user_id)
    .bind(role.as_str())
    .fetch_optional(pool)
    .await?;

    let Some(user) = user else {
        tracing::warn!(user_id, %role, "login for unknown user");
        return Err(AppError::InvalidCredentials);
    };

    if !password::verify_password_blocking(password, user.hashed_password).await? {
        tracing::warn!(user_id, %role, "login with wrong password");
        return Err(AppError::InvalidCredentials);
    }

    let token = keys.issue(user.user_id, user.role)?;
    tracing::info!(user_id, %role, "login succeeded");

    Ok(LoginResponse {
        success: true,
        token,
        expires_in: keys.ttl_seconds(),
    })
}

/// Seed one director account if no users exist yet.
///
/// Returns whether an account was created.
pub async fn bootstrap_director(
    pool: &DbPool,
    user_id: i32,
    password: &str,
) -> Result<bool, AppError> {
    let has_users: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users)")
        .fetch_one(pool)
        .await?;

    if has_users {
        return Ok(false);
    }

    create_user(
        pool,
        CreateUserRequest {
            user_id,
            role: Role::Director,
            password: password.to_string(),
        },
    )
    .await?;

    Ok(true)
}
