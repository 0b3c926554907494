/**
 * Account Model and Store Interface
 *
 * This module defines the account record, the store operations the auth
 * flows consume, and the field validation shared by every store backend.
 *
 * # Password Hash Visibility
 *
 * `Account` has no password field at all, so it can be serialized anywhere.
 * The hash only leaves the store as `StoredCredentials`, through
 * `find_credentials_by_email`, which only the sign-in flow calls.
 */

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Default profile name for new accounts
pub const DEFAULT_NAME: &str = "Jacques-Yves Cousteau";
/// Default profile description for new accounts
pub const DEFAULT_ABOUT: &str = "Explorer";
/// Default avatar for new accounts
pub const DEFAULT_AVATAR: &str =
    "https://pictures.s3.yandex.net/resources/jacques-cousteau_1604399756.png";

/// Account as exposed to handlers and clients (no password hash)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Account {
    /// Unique account ID (UUID)
    #[serde(rename = "_id")]
    pub id: Uuid,
    /// Email address, unique, case-sensitive as stored
    pub email: String,
    /// Display name
    pub name: String,
    /// Short self-description
    pub about: String,
    /// Avatar URL
    pub avatar: String,
}

/// Stored credentials for the sign-in flow
#[derive(Clone, sqlx::FromRow)]
pub struct StoredCredentials {
    pub account_id: Uuid,
    pub password_hash: String,
}

impl std::fmt::Debug for StoredCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoredCredentials")
            .field("account_id", &self.account_id)
            .field("password_hash", &"<redacted>")
            .finish()
    }
}

/// Fields for a new account, password already hashed
#[derive(Clone)]
pub struct NewAccount {
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub about: String,
    pub avatar: String,
}

/// Partial profile update; `None` leaves a field unchanged
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub about: Option<String>,
    pub avatar: Option<String>,
}

/// Account store errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A unique field (email) is already taken
    #[error("unique constraint violated")]
    UniqueViolation,

    /// The record failed field validation
    #[error("validation failed: {0}")]
    Validation(String),

    /// Anything else the backend reported
    #[error("store backend error: {0}")]
    Backend(String),
}

/// Account store operations
///
/// Implementations must enforce email uniqueness atomically and report it
/// as `StoreError::UniqueViolation`, distinct from `StoreError::Validation`.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Find an account by exact email
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError>;

    /// Find an account's id and password hash by exact email
    async fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> Result<Option<StoredCredentials>, StoreError>;

    /// Create an account
    async fn create(&self, account: NewAccount) -> Result<Account, StoreError>;

    /// Find an account by id
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, StoreError>;

    /// Apply a profile update, returning the updated account if it exists
    async fn update(&self, id: Uuid, update: ProfileUpdate) -> Result<Option<Account>, StoreError>;

    /// List all accounts
    async fn list(&self) -> Result<Vec<Account>, StoreError>;
}

/// Validate an email address
///
/// Requires exactly one `@`, a non-empty local part, and a domain with at
/// least one inner dot. No whitespace anywhere.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };

    if local.is_empty() || domain.is_empty() {
        return false;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2 && labels.iter().all(|label| !label.is_empty())
}

/// Validate a profile text field (2-30 characters)
pub fn is_valid_profile_text(value: &str) -> bool {
    (2..=30).contains(&value.chars().count())
}

/// Validate an avatar or card link
///
/// Must be an absolute `http` or `https` URL with a non-empty host.
pub fn is_valid_http_url(url: &str) -> bool {
    if url.chars().any(char::is_whitespace) {
        return false;
    }

    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"));

    match rest {
        Some(rest) => {
            let host = rest.split(['/', '?', '#']).next().unwrap_or_default();
            !host.is_empty() && (host.contains('.') || host.starts_with("localhost"))
        }
        None => false,
    }
}

impl NewAccount {
    /// Check the profile fields
    pub fn validate(&self) -> Result<(), StoreError> {
        if !is_valid_email(&self.email) {
            return Err(StoreError::Validation("invalid email format".into()));
        }
        ProfileUpdate {
            name: Some(self.name.clone()),
            about: Some(self.about.clone()),
            avatar: Some(self.avatar.clone()),
        }
        .validate()
    }
}

impl ProfileUpdate {
    /// Check the fields that are present
    pub fn validate(&self) -> Result<(), StoreError> {
        if let Some(name) = &self.name {
            if !is_valid_profile_text(name) {
                return Err(StoreError::Validation("name must be 2-30 characters".into()));
            }
        }
        if let Some(about) = &self.about {
            if !is_valid_profile_text(about) {
                return Err(StoreError::Validation("about must be 2-30 characters".into()));
            }
        }
        if let Some(avatar) = &self.avatar {
            if !is_valid_http_url(avatar) {
                return Err(StoreError::Validation("avatar must be an http(s) URL".into()));
            }
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.about.is_none() && self.avatar.is_none()
    }
}
