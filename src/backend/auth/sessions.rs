/**
 * Session Tokens
 *
 * This module issues and verifies the signed session token (HS256 JWT).
 * The token carries the account id (`sub`), issue time and an expiry
 * seven days after issue. Nothing about it is stored server-side.
 */

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::backend::server::config::AuthConfig;

/// Session lifetime
pub const TOKEN_LIFETIME_DAYS: i64 = 7;

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Account ID
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at time (Unix timestamp)
    pub iat: i64,
}

/// Token verification failures
///
/// Kept apart for logging; callers turn every kind into the same
/// `Unauthorized` response.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    /// Signature doesn't match (tampered or signed with another key)
    #[error("token signature is invalid")]
    InvalidSignature,

    /// Past its expiration instant
    #[error("token has expired")]
    Expired,

    /// Not a parseable token
    #[error("token is malformed")]
    Malformed,
}

/// Token issuing failure
#[derive(Debug, Error)]
#[error("failed to sign session token: {0}")]
pub struct TokenIssueError(#[from] jsonwebtoken::errors::Error);

/// Issues and verifies session tokens with the process signing key
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenCodec {
    pub fn new(config: &AuthConfig) -> Self {
        let secret = config.signing_key.as_bytes();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Issue a token for an account, valid for seven days from now
    pub fn issue(&self, account_id: Uuid) -> Result<String, TokenIssueError> {
        self.issue_at(account_id, Utc::now())
    }

    /// Issue a token as if at `issued_at`
    pub fn issue_at(
        &self,
        account_id: Uuid,
        issued_at: DateTime<Utc>,
    ) -> Result<String, TokenIssueError> {
        let claims = Claims {
            sub: account_id.to_string(),
            iat: issued_at.timestamp(),
            exp: (issued_at + Duration::days(TOKEN_LIFETIME_DAYS)).timestamp(),
        };

        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?)
    }

    /// Verify a token and return the account id it was issued for
    ///
    /// Checks the signature first, then the expiry. The signature covers
    /// the raw header and payload text, so any edit to the payload is
    /// `InvalidSignature`. A header or signature segment that no longer
    /// decodes is `Malformed`. Callers treat every kind the same.
    pub fn verify(&self, token: &str) -> Result<Uuid, TokenError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            match e.kind() {
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Malformed,
            }
        })?;

        Uuid::parse_str(&data.claims.sub).map_err(|_| TokenError::Malformed)
    }
}
