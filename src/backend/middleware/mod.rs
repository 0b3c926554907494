//! Middleware Module
//!
//! HTTP middleware for the backend server.
//!
//! - **`auth`** - Session gate for protected routes
//!
//! # Example
//!
//! ```rust,no_run
//! use axum::middleware::from_fn_with_state;
//! use mesto::backend::middleware::require_session;
//! # use axum::Router;
//! # use mesto::backend::server::state::AppState;
//! # fn example(protected: Router<AppState>, state: AppState) -> Router<AppState> {
//! protected.route_layer(from_fn_with_state(state, require_session))
//! # }
//! ```

pub mod auth;

pub use auth::{authenticate, require_session, AuthenticatedAccount, CurrentAccount};
