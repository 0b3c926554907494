//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Router assembly, gate, CORS and tracing layers
//! └── api_routes.rs   - Path to handler wiring
//! ```
//!
//! # Route Types
//!
//! ## Public
//!
//! - `POST /signup` - Account registration
//! - `POST /signin` - Sign in
//! - `GET /signout` - Sign out
//!
//! ## Protected
//!
//! - `GET /users`, `GET /users/me`, `GET /users/{user_id}`
//! - `PATCH /users/me`, `PATCH /users/me/avatar`
//! - `GET /cards`, `POST /cards`, `DELETE /cards/{card_id}`
//! - `PUT /cards/{card_id}/likes`, `DELETE /cards/{card_id}/likes`
//!
//! Unknown paths answer `404 {"message": ...}`, a known path with the
//! wrong method answers `405 {"message": ...}`.
//!
//! # Example
//!
//! ```rust,no_run
//! use mesto::backend::routes::create_router;
//! use mesto::backend::server::state::AppState;
//!
//! # fn example(app_state: AppState) {
//! let router = create_router(app_state, &["http://localhost:3010".to_string()]);
//! # }
//! ```

/// Main router creation
pub mod router;

/// Path to handler wiring
pub mod api_routes;

pub use router::{cors_layer, create_router};
