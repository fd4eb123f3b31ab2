//! Bearer token authentication middleware.
//!
//! This middleware intercepts every protected request to:
//! 1. Extract the token from the Authorization header
//! 2. Verify its signature and expiry
//! 3. Inject the staff member's identity into the request
//! 4. Reject unauthorized requests with HTTP 401

use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};

use crate::{app::AppState, error::AppError, models::user::Role};

/// Roles allowed to register and edit students.
pub const REGISTRY_ROLES: &[Role] = &[Role::Registrar, Role::Director];

/// Roles allowed to record payments and expenses.
pub const FINANCE_ROLES: &[Role] = &[Role::Finance, Role::Director];

/// Roles allowed to manage programs, fees and staff accounts.
pub const DIRECTOR_ONLY: &[Role] = &[Role::Director];

/// Authentication context attached to authenticated requests.
///
/// Handlers extract it with `Extension<AuthContext>`.
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// Staff number from the token subject
    pub user_id: i32,

    pub role: Role,
}

impl AuthContext {
    /// `Forbidden` unless the caller's role is one of `allowed`.
    pub fn require(&self, allowed: &[Role]) -> Result<(), AppError> {
        if allowed.contains(&self.role) {
            Ok(())
        } else {
            tracing::warn!(user_id = self.user_id, role = %self.role, "role not permitted");
            Err(AppError::Forbidden)
        }
    }
}

/// Token authentication middleware function.
///
/// # Headers
///
/// Expected header format:
/// ```text
/// Authorization: Bearer <jwt>
/// ```
///
/// # Returns
///
/// - `Ok(Response)` if authenticated successfully (calls next handler)
/// - `Err(AppError::InvalidToken)` if authentication fails (returns 401)
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(request.headers())?;

    let claims = state.tokens.verify(token)?;
    let user_id = claims
        .sub
        .parse::<i32>()
        .map_err(|_| AppError::InvalidToken)?;

    request.extensions_mut().insert(AuthContext {
        user_id,
        role: claims.role,
    });

    Ok(next.run(request).await)
}

fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.split_once(' '))
        // auth schemes are case-insensitive
        .filter(|(scheme, _)| scheme.eq_ignore_ascii_case("bearer"))
        .map(|(_, token)| token.trim())
        .ok_or(AppError::InvalidToken)?;

    if token.is_empty() {
        return Err(AppError::InvalidToken);
    }

    Ok(token)
}
