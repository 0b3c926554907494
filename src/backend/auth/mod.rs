//! Authentication Module
//!
//! This module handles account registration, credential verification and
//! session transport.
//!
//! # Architecture
//!
//! - **`users`** - Account model, validation and the `AccountStore` trait
//! - **`pg_store`** - PostgreSQL `AccountStore`
//! - **`memory_store`** - In-memory `AccountStore` for development and tests
//! - **`passwords`** - bcrypt hashing off the async runtime
//! - **`sessions`** - Signed session tokens
//! - **`cookies`** - The `jwt` session cookie
//! - **`handlers`** - HTTP handlers for signup, signin and signout
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs           - Module exports and documentation
//! ├── users.rs         - Account model and store trait
//! ├── pg_store.rs      - PostgreSQL store
//! ├── memory_store.rs  - In-memory store
//! ├── passwords.rs     - bcrypt hasher
//! ├── sessions.rs      - Token issue and verify
//! ├── cookies.rs       - Session cookie
//! └── handlers/        - HTTP handlers
//! ```
//!
//! # Security
//!
//! - Passwords are hashed with bcrypt (cost 10) and never leave the store
//! - Tokens are HS256, expire after 7 days and carry only the account id
//! - Unknown email and wrong password are indistinguishable to the client

/// Account model, validation and store trait
pub mod users;

/// PostgreSQL account store
pub mod pg_store;

/// In-memory account store
pub mod memory_store;

/// Password hashing
pub mod passwords;

/// Session token issue and verification
pub mod sessions;

/// Session cookie transport
pub mod cookies;

/// HTTP handlers for authentication endpoints
pub mod handlers;

pub use cookies::{SessionCookie, SESSION_COOKIE};
pub use handlers::{signin, signout, signup};
pub use memory_store::MemoryAccountStore;
pub use passwords::PasswordHasher;
pub use pg_store::PgAccountStore;
pub use sessions::{TokenCodec, TokenError};
pub use users::{Account, AccountStore, ProfileUpdate, StoreError};
