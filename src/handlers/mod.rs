//! HTTP request handlers (route handlers).
//!
//! Each handler is an async function that:
//! 1. Receives HTTP request data (JSON body, URL params, etc.)
//! 2. Checks the caller's role and validates input
//! 3. Runs a query or calls a service
//! 4. Returns HTTP response (JSON, status code)

/// Staff login
pub mod auth;
/// Office expense ledger
pub mod expenses;
/// Fee balances and fee payments per student
pub mod fee_payments;
/// Fee catalogue
pub mod fees;
/// Service health
pub mod health;
/// Tuition payments and statements
pub mod payments;
/// Tuition programs
pub mod programs;
/// Student registry
pub mod students;
/// Staff accounts
pub mod users;
