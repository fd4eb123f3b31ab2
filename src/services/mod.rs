//! Business logic services.
//!
//! Services contain logic separated from HTTP handlers: multi-statement
//! database transactions, password hashing and token signing.

pub mod password;
pub mod payment_service;
pub mod student_service;
pub mod token;
pub mod user_service;
