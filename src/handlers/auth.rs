//! Staff login.

use axum::{Json, extract::State};

use crate::{
    app::AppState,
    error::AppError,
    extract::AppJson,
    models::user::{LoginRequest, LoginResponse},
    services::user_service,
};

/// Exchange staff credentials for a bearer token.
///
/// # Endpoint
///
/// `POST /api/v1/login`
///
/// # Request Body
///
/// ```json
/// { "user_id": 25291, "password": "...", "role": "registrar" }
/// ```
///
/// # Response
///
/// - **Success (200 OK)**: `{"success": true, "token": "...", "expires_in": 3600}`
/// - **Error (400)**: a field is missing or empty
/// - **Error (401)**: unknown user/role pair or wrong password
pub async fn login(
    State(state): State<AppState>,
    AppJson(request): AppJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let credentials = request.into_credentials()?;

    let response = user_service::authenticate(&state.pool, &state.tokens, credentials).await?;

    Ok(Json(response))
}
