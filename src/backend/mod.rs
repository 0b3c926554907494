//! Backend Module
//!
//! This module contains the server side of the Mesto application: an Axum
//! HTTP server with cookie-based session authentication in front of the
//! account profile and card routes.
//!
//! # Architecture
//!
//! - **`server`** - Configuration, application state, app creation
//! - **`routes`** - Route wiring and router assembly
//! - **`auth`** - Accounts, password hashing, session tokens and cookies
//! - **`middleware`** - Session gate for protected routes
//! - **`profile`** - Account profile handlers
//! - **`cards`** - Photo cards and likes
//! - **`error`** - `BackendError` and its HTTP rendering
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - Server binary
//! ├── server/         - Configuration, state and initialization
//! ├── routes/         - Route configuration
//! ├── auth/           - Authentication
//! ├── middleware/     - Session gate
//! ├── profile/        - Profile handlers
//! ├── cards/          - Card model, stores and handlers
//! └── error/          - Error types
//! ```
//!
//! # Request Flow
//!
//! 1. `TraceLayer` opens a span, `CorsLayer` answers preflights
//! 2. Public routes (`/signup`, `/signin`, `/signout`) go straight to their handlers
//! 3. `/users/**` and `/cards/**` pass `require_session` first; failures end with 401
//! 4. Handler errors render as `{"message": ...}` through `BackendError`
//!
//! # Thread Safety
//!
//! Configuration, the token codec and the cookie policy are immutable and
//! shared by `Arc` or by value. The account and card stores are the only
//! shared mutable state and synchronise internally.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Backend error types
pub mod error;

/// Authentication and account management
pub mod auth;

/// Middleware for request processing
pub mod middleware;

/// Profile handlers
pub mod profile;

/// Photo cards
pub mod cards;

pub use error::BackendError;
pub use server::{create_app, AppState};
