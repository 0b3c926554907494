//! Backend Error Module
//!
//! This module defines the error taxonomy of the backend server and the single
//! boundary that renders it to clients.
//!
//! # Architecture
//!
//! - **`types`** - `BackendError` and conversions from component errors
//! - **`conversion`** - `IntoResponse` rendering (`{"message": ...}` bodies)
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and shared messages
//! ├── types.rs      - Error type definitions
//! └── conversion.rs - HTTP response rendering
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use mesto::backend::error::BackendError;
//! use axum::response::Response;
//!
//! # async fn example() -> Result<Response, BackendError> {
//! Err(BackendError::not_found("user not found"))
//! # }
//! ```

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

pub use types::{BackendError, INTERNAL_ERROR_MESSAGE};

/// Rejection message when no session cookie was sent
pub const AUTHENTICATION_REQUIRED: &str = "authentication required";

/// Rejection message for any token that fails verification
pub const AUTHENTICATION_ERROR: &str = "authentication error";

/// Login failure message, identical for unknown email and wrong password
pub const INVALID_CREDENTIALS: &str = "incorrect email or password";
