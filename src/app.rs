//! Router assembly and shared handler state.

use std::sync::Arc;

use axum::{
    Router,
    extract::FromRef,
    middleware as axum_middleware,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{db::DbPool, error::AppError, handlers, middleware, services::token::TokenKeys};

/// State shared by every handler.
///
/// Handlers that only need the database keep extracting `State<DbPool>`
/// through the `FromRef` impl below.
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub tokens: Arc<TokenKeys>,
}

impl AppState {
    pub fn new(pool: DbPool, tokens: TokenKeys) -> Self {
        Self {
            pool,
            tokens: Arc::new(tokens),
        }
    }
}

impl FromRef<AppState> for DbPool {
    fn from_ref(state: &AppState) -> Self {
        state.pool.clone()
    }
}

/// Build the full HTTP application.
///
/// - Public: `GET /health`, `POST /api/v1/login`
/// - Everything else under `/api/v1` requires a bearer token
/// - Unmatched paths get a JSON 404
pub fn build_app(state: AppState) -> Router {
    let authenticated_routes = Router::new()
        // Staff accounts
        .route(
            "/api/v1/users",
            post(handlers::users::create_user).get(handlers::users::list_users),
        )
        // Programs and fees
        .route(
            "/api/v1/programs",
            post(handlers::programs::create_program).get(handlers::programs::list_programs),
        )
        .route("/api/v1/programs/{id}", get(handlers::programs::get_program))
        .route(
            "/api/v1/fees",
            post(handlers::fees::create_fee).get(handlers::fees::list_fees),
        )
        .route("/api/v1/fees/{id}", get(handlers::fees::get_fee))
        // Students
        .route(
            "/api/v1/students",
            post(handlers::students::create_student).get(handlers::students::list_students),
        )
        .route(
            "/api/v1/students/{id}",
            get(handlers::students::get_student).patch(handlers::students::update_student),
        )
        // Tuition payments
        .route(
            "/api/v1/students/{id}/payments",
            post(handlers::payments::create_payment).get(handlers::payments::list_payments),
        )
        .route(
            "/api/v1/students/{id}/statement",
            get(handlers::payments::get_statement),
        )
        // Fee balances and fee payments
        .route(
            "/api/v1/students/{id}/fees",
            post(handlers::fee_payments::assign_fee),
        )
        .route(
            "/api/v1/students/{id}/balance",
            get(handlers::fee_payments::get_balance),
        )
        .route(
            "/api/v1/students/{id}/fee-payments",
            post(handlers::fee_payments::create_fee_payment)
                .get(handlers::fee_payments::list_fee_payments),
        )
        // Expenses
        .route(
            "/api/v1/expenses",
            post(handlers::expenses::create_expense).get(handlers::expenses::list_expenses),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::auth_middleware,
        ));

    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/api/v1/login", post(handlers::auth::login))
        .merge(authenticated_routes)
        .fallback(route_not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

async fn route_not_found() -> AppError {
    AppError::RouteNotFound
}
