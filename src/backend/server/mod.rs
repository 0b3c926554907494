//! Server Module
//!
//! This module contains the server-side code for configuring and
//! initializing the Axum HTTP server.
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs          - Module exports and documentation
//! ├── state.rs        - AppState and FromRef implementations
//! ├── config.rs       - Environment configuration and database loading
//! └── init.rs         - App creation
//! ```
//!
//! # State Management
//!
//! `AppState` is the central state container. It holds the account store,
//! the password hasher, the token codec and the session cookie policy.
//! Everything but the store is immutable after startup.
//!
//! # Initialization Flow
//!
//! 1. **Configuration Loading**: `AppConfig::from_env` (fails fast in production without a key)
//! 2. **Store Selection**: PostgreSQL with migrations, or in-memory
//! 3. **Router Creation**: routes, session gate, CORS and tracing
//!
//! # Example
//!
//! ```rust,no_run
//! use mesto::backend::server::{config::AppConfig, create_app};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::from_env()?;
//! let app = create_app(&config).await?;
//! # Ok(())
//! # }
//! ```

/// Application state management
pub mod state;

/// Server configuration loading
pub mod config;

/// Server initialization
pub mod init;

pub use config::{AppConfig, AuthConfig, ConfigError};
pub use init::{create_app, create_app_with_stores};
pub use state::{AppState, DynAccountStore, DynCardStore};
