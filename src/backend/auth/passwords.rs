/**
 * Password Hashing
 *
 * bcrypt hashing and verification. Each hash embeds its own random salt,
 * so hashing the same password twice gives two different strings that
 * both verify.
 *
 * bcrypt is deliberately slow, so both operations run on the blocking
 * thread pool via `tokio::task::spawn_blocking`.
 */

use std::sync::Arc;

use thiserror::Error;

/// bcrypt cost used for stored passwords
pub const PASSWORD_COST: u32 = 10;

/// Lowest cost bcrypt accepts; only for test fixtures
pub const MIN_COST: u32 = 4;

const DUMMY_PASSWORD: &str = "mesto-unknown-account";

/// Password hashing errors
///
/// Verification never returns this; a failed or impossible comparison
/// is just `false`.
#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    #[error("password hashing task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// bcrypt password hasher
#[derive(Clone)]
pub struct PasswordHasher {
    cost: u32,
    // Hash compared against when the account doesn't exist
    dummy_hash: Option<Arc<str>>,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::with_cost(PASSWORD_COST)
    }
}

impl PasswordHasher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hasher with a custom bcrypt cost (tests use `MIN_COST`)
    ///
    /// The dummy hash for unknown accounts is computed here, once, so the
    /// first unknown-email sign-in costs the same as any later one.
    pub fn with_cost(cost: u32) -> Self {
        let dummy_hash = match bcrypt::hash(DUMMY_PASSWORD, cost) {
            Ok(hash) => Some(Arc::from(hash)),
            Err(e) => {
                tracing::error!("Failed to prepare dummy password hash: {}", e);
                None
            }
        };
        Self { cost, dummy_hash }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a password with a fresh random salt
    pub async fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let password = password.to_owned();
        let cost = self.cost;
        let hashed = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost)).await??;
        Ok(hashed)
    }

    /// Check a password against a stored hash
    ///
    /// A malformed hash or a failed background task is reported as `false`,
    /// exactly like a wrong password.
    pub async fn verify(&self, password: &str, hash: &str) -> bool {
        let password = password.to_owned();
        let hash = hash.to_owned();
        match tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash)).await {
            Ok(Ok(matched)) => matched,
            Ok(Err(e)) => {
                tracing::debug!("Stored password hash could not be checked: {}", e);
                false
            }
            Err(e) => {
                tracing::error!("Password verification task failed: {}", e);
                false
            }
        }
    }

    /// Spend the cost of one verification without an account
    ///
    /// Called when a sign-in email is unknown so the response time matches
    /// a wrong-password attempt. Always returns `false`.
    pub async fn verify_dummy(&self, password: &str) -> bool {
        match &self.dummy_hash {
            Some(hash) => {
                let _ = self.verify(password, hash).await;
            }
            None => tracing::warn!("No dummy password hash, unknown-email sign-in is not padded"),
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hasher() -> PasswordHasher {
        PasswordHasher::with_cost(MIN_COST)
    }

    #[test]
    fn test_default_cost() {
        assert_eq!(PasswordHasher::new().cost(), 10);
    }

    #[tokio::test]
    async fn test_hash_and_verify() {
        let hasher = hasher();
        let hash = hasher.hash("secret1").await.unwrap();
        assert_ne!(hash, "secret1");
        assert!(hasher.verify("secret1", &hash).await);
    }

    #[tokio::test]
    async fn test_wrong_password_does_not_verify() {
        let hasher = hasher();
        let hash = hasher.hash("secret1").await.unwrap();
        assert!(!hasher.verify("secret2", &hash).await);
        assert!(!hasher.verify("", &hash).await);
    }

    #[tokio::test]
    async fn test_hashes_are_salted() {
        let hasher = hasher();
        let first = hasher.hash("secret1").await.unwrap();
        let second = hasher.hash("secret1").await.unwrap();
        assert_ne!(first, second);
        assert!(hasher.verify("secret1", &first).await);
        assert!(hasher.verify("secret1", &second).await);
    }

    #[tokio::test]
    async fn test_hash_embeds_cost() {
        let hash = PasswordHasher::with_cost(PASSWORD_COST).hash("secret1").await.unwrap();
        assert!(hash.starts_with("$2b$10$"));
    }

    #[tokio::test]
    async fn test_malformed_hash_is_plain_false() {
        let hasher = hasher();
        assert!(!hasher.verify("secret1", "not-a-bcrypt-hash").await);
        assert!(!hasher.verify("secret1", "").await);
    }

    #[tokio::test]
    async fn test_verify_dummy_is_false() {
        let hasher = hasher();
        assert!(!hasher.verify_dummy("secret1").await);
        assert!(!hasher.verify_dummy(DUMMY_PASSWORD).await);
    }

    #[test]
    fn test_dummy_hash_prepared_at_construction() {
        let hasher = hasher();
        let dummy = hasher.dummy_hash.as_deref().unwrap();
        assert!(dummy.starts_with("$2b$04$"));
        assert!(bcrypt::verify(DUMMY_PASSWORD, dummy).unwrap());

        // clones share the same hash
        let clone = hasher.clone();
        assert_eq!(clone.dummy_hash.as_deref(), Some(dummy));
    }

    #[test]
    fn test_invalid_cost_leaves_no_dummy_hash() {
        assert!(PasswordHasher::with_cost(MIN_COST - 1).dummy_hash.is_none());
    }
}
