//! Tuition Office Server
//!
//! A REST API for a training-program office: students, tuition programs,
//! fees, payments, expenses and staff logins.
//!
//! # Architecture
//!
//! - **Web Framework**: Axum (async HTTP server)
//! - **Database**: PostgreSQL with sqlx (async queries)
//! - **Authentication**: HS256 JWT issued at login, Argon2id password hashes
//! - **Format**: JSON requests/responses, money in integer cents

pub mod app;
pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
