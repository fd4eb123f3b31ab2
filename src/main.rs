//! Tuition Office Server - Main Application Entry Point
//!
//! # Startup Flow
//!
//! 1. Load configuration from environment variables
//! 2. Create database connection pool
//! 3. Run database migrations
//! 4. Seed the bootstrap director if configured and no users exist
//! 5. Build HTTP router with routes and middleware
//! 6. Start server on configured port

use tracing_subscriber::EnvFilter;

use tuition_office_server::{
    app::{self, AppState},
    config, db,
    services::{token::TokenKeys, user_service},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Reads RUST_LOG environment variable (defaults to "info" level)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = config::Config::from_env()?;
    tracing::info!(?config, "Configuration loaded");

    let pool = db::create_pool(&config.database_url, config.database_max_connections).await?;
    tracing::info!("Database pool created");

    db::run_migrations(&pool).await?;
    tracing::info!("Database migrations complete");

    if let Some((user_id, password)) = config.bootstrap_director() {
        if user_service::bootstrap_director(&pool, user_id, password).await? {
            tracing::info!(user_id, "Bootstrap director created");
        }
    }

    let tokens = TokenKeys::new(config.jwt_secret.as_bytes(), config.jwt_ttl_seconds);
    let app = app::build_app(AppState::new(pool, tokens));

    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
