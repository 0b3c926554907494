//! Mesto - Backend Library
//!
//! Mesto is a small social photo-sharing service. This crate is its HTTP
//! backend: account registration, credential sign-in with signed session
//! tokens carried in an `HttpOnly` cookie, and the profile and card routes
//! guarded by that session.
//!
//! # Module Structure
//!
//! - **`backend`** - Axum server, authentication, profile and card routes
//!
//! # Usage
//!
//! ```rust,no_run
//! use mesto::backend::server::{config::AppConfig, create_app};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::from_env()?;
//! let app = create_app(&config).await?;
//! let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration
//!
//! Read from the environment (a `.env` file is honoured by the binary):
//!
//! - `APP_ENV` - `production` turns on production mode
//! - `JWT_SECRET` - token signing key, required in production
//! - `COOKIE_SAME_SITE` - `none`, `lax` or `strict`
//! - `CORS_ORIGINS` - comma-separated client origins
//! - `DATABASE_URL` - PostgreSQL; accounts live in memory without it
//! - `SERVER_PORT` - listen port, default 3000
//!
//! # Error Handling
//!
//! Component errors (`ConfigError`, `StoreError`, `PasswordError`,
//! `TokenError`) are `thiserror` enums that convert into `BackendError`,
//! which renders as a status code and a `{"message": ...}` body.

/// Backend server-side code
pub mod backend;
