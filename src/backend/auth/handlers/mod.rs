//! Authentication Handlers Module
//!
//! This module contains the HTTP handlers for the public authentication
//! endpoints.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs      - Module exports and documentation
//! ├── types.rs    - Request and response types
//! ├── signup.rs   - Account registration handler
//! ├── signin.rs   - Credential check and session issue
//! └── signout.rs  - Session cookie removal
//! ```
//!
//! # Handlers
//!
//! - **`signup`** - POST /signup - Account registration
//! - **`signin`** - POST /signin - Authentication, sets the `jwt` cookie
//! - **`signout`** - GET /signout - Clears the `jwt` cookie
//!
//! # Authentication Flow
//!
//! 1. **Signup**: email and password → account created → account returned (no session)
//! 2. **Signin**: email and password → credentials verified → token in cookie and body
//! 3. **Protected routes**: cookie → token verified by `require_session` → handler
//! 4. **Signout**: cookie cleared
//!
//! # Example
//!
//! ```rust,no_run
//! use mesto::backend::auth::handlers::{signin, signout, signup};
//! use mesto::backend::server::state::AppState;
//! use axum::{routing::{get, post}, Router};
//!
//! # fn example(state: AppState) -> Router {
//! Router::new()
//!     .route("/signup", post(signup))
//!     .route("/signin", post(signin))
//!     .route("/signout", get(signout))
//!     .with_state(state)
//! # }
//! ```

/// Request and response types
pub mod types;

/// Signup handler
pub mod signup;

/// Signin handler
pub mod signin;

/// Signout handler
pub mod signout;

pub use types::{MessageResponse, SigninRequest, SignupRequest, TokenResponse};

pub use signin::signin;
pub use signout::signout;
pub use signup::signup;
