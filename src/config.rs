//! Application configuration management.
//!
//! This module handles loading configuration from environment variables.
//! It uses the `envy` crate to automatically deserialize environment variables into a type-safe struct.

use serde::Deserialize;

/// Longest token lifetime accepted: one year.
pub const MAX_JWT_TTL_SECONDS: i64 = 365 * 24 * 60 * 60;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(transparent)]
    Env(#[from] envy::Error),

    #[error("JWT_TTL_SECONDS must be between 1 and {MAX_JWT_TTL_SECONDS}, got {0}")]
    InvalidJwtTtl(i64),
}

/// Application configuration loaded from environment variables.
///
/// # Environment Variables
///
/// - `DATABASE_URL` (required): PostgreSQL connection string
/// - `JWT_SECRET` (required): HMAC secret used to sign login tokens
/// - `SERVER_PORT` (optional): HTTP server port, defaults to 3000
/// - `DATABASE_MAX_CONNECTIONS` (optional): pool size, defaults to 5
/// - `JWT_TTL_SECONDS` (optional): token lifetime, defaults to one hour,
///   at most one year
/// - `BOOTSTRAP_DIRECTOR_ID` / `BOOTSTRAP_DIRECTOR_PASSWORD` (optional):
///   seed a director account when the users table is empty
#[derive(Clone, Deserialize)]
pub struct Config {
    pub database_url: String,

    pub jwt_secret: String,

    #[serde(default = "default_port")]
    pub server_port: u16,

    #[serde(default = "default_max_connections")]
    pub database_max_connections: u32,

    #[serde(default = "default_jwt_ttl")]
    pub jwt_ttl_seconds: i64,

    #[serde(default)]
    pub bootstrap_director_id: Option<i32>,

    #[serde(default)]
    pub bootstrap_director_password: Option<String>,
}

/// Default port if SERVER_PORT environment variable is not set.
fn default_port() -> u16 {
    3000
}

fn default_max_connections() -> u32 {
    5
}

fn default_jwt_ttl() -> i64 {
    3600
}

// Secrets stay out of logs.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("server_port", &self.server_port)
            .field("database_max_connections", &self.database_max_connections)
            .field("jwt_ttl_seconds", &self.jwt_ttl_seconds)
            .field("bootstrap_director_id", &self.bootstrap_director_id)
            .finish_non_exhaustive()
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// This method first attempts to load a `.env` file (which is optional),
    /// then reads environment variables and deserializes them into a Config struct.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Required environment variables are missing (e.g., DATABASE_URL, JWT_SECRET)
    /// - Environment variable values cannot be parsed into expected types
    /// - `JWT_TTL_SECONDS` is not positive or longer than a year
    pub fn from_env() -> Result<Self, ConfigError> {
        // Try to load .env file if it exists (does nothing if not found)
        dotenvy::dotenv().ok();

        // Field names are automatically converted: database_url -> DATABASE_URL
        envy::from_env::<Config>()?.validate()
    }

    /// Range checks serde cannot express.
    pub fn validate(self) -> Result<Self, ConfigError> {
        if !(1..=MAX_JWT_TTL_SECONDS).contains(&self.jwt_ttl_seconds) {
            return Err(ConfigError::InvalidJwtTtl(self.jwt_ttl_seconds));
        }
        Ok(self)
    }

    /// Director credentials to seed, when both halves are configured.
    pub fn bootstrap_director(&self) -> Option<(i32, &str)> {
        match (self.bootstrap_director_id, self.bootstrap_director_password.as_deref()) {
            (Some(id), Some(password)) if !password.is_empty() => Some((id, password)),
            _ => None,
        }
    }
}
