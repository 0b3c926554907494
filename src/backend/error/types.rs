/**
 * Backend Error Types
 *
 * This module defines the closed error taxonomy every request handler and
 * the auth gate converge on.
 *
 * # Error Categories
 *
 * - `InvalidInput` - malformed body or field validation failure (400)
 * - `Unauthorized` - missing/invalid/expired token or failed credential check (401)
 * - `Forbidden` - authenticated but not allowed, e.g. deleting another account's card (403)
 * - `NotFound` - referenced account, card or route absent (404)
 * - `MethodNotAllowed` - known path, unsupported method (405)
 * - `Conflict` - duplicate unique field (409)
 * - `Internal` - unexpected store or crypto failure (500)
 *
 * # Leakage
 *
 * `Internal` carries its cause for logging only. The client always sees the
 * generic message, never the raw cause.
 */

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::auth::passwords::PasswordError;
use crate::backend::auth::sessions::TokenError;
use crate::backend::auth::users::StoreError;

/// Message rendered for every `Internal` error
pub const INTERNAL_ERROR_MESSAGE: &str = "internal server error";

const METHOD_NOT_ALLOWED_MESSAGE: &str = "method not allowed";

/// Backend error taxonomy
///
/// # Usage
///
/// ```rust
/// use mesto::backend::error::BackendError;
///
/// let err = BackendError::conflict("account already exists");
/// assert_eq!(err.status_code().as_u16(), 409);
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Malformed request body or invalid fields
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Authentication required or failed
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Caller may not act on this resource
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Referenced resource does not exist
    #[error("not found: {0}")]
    NotFound(String),

    #[error("method not allowed")]
    MethodNotAllowed,

    /// Unique field already taken
    #[error("conflict: {0}")]
    Conflict(String),

    /// Unexpected failure; the cause is only logged
    #[error("internal error: {cause}")]
    Internal {
        /// Diagnostic cause, never sent to clients
        cause: String,
    },
}

impl BackendError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    pub fn internal(cause: impl Into<String>) -> Self {
        Self::Internal { cause: cause.into() }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the client-visible message
    pub fn message(&self) -> String {
        match self {
            Self::InvalidInput(message)
            | Self::Unauthorized(message)
            | Self::Forbidden(message)
            | Self::NotFound(message)
            | Self::Conflict(message) => message.clone(),
            Self::MethodNotAllowed => METHOD_NOT_ALLOWED_MESSAGE.to_string(),
            Self::Internal { .. } => INTERNAL_ERROR_MESSAGE.to_string(),
        }
    }
}

impl From<JsonRejection> for BackendError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("Rejected request body: {}", rejection.body_text());
        Self::invalid_input("malformed request body")
    }
}

impl From<PasswordError> for BackendError {
    fn from(err: PasswordError) -> Self {
        Self::internal(err.to_string())
    }
}

// Handlers that need a distinct message for a specific kind match on the
// store error before converting.
impl From<StoreError> for BackendError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UniqueViolation => Self::conflict("account already exists"),
            StoreError::Validation(message) => Self::InvalidInput(message),
            StoreError::Backend(cause) => Self::Internal { cause },
        }
    }
}

// Every token failure looks the same from the outside.
impl From<TokenError> for BackendError {
    fn from(err: TokenError) -> Self {
        tracing::debug!("Token rejected: {}", err);
        Self::unauthorized(super::AUTHENTICATION_ERROR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_mapping() {
        assert_eq!(
            BackendError::invalid_input("bad").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            BackendError::unauthorized("no").status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(BackendError::forbidden("not yours").status_code(), StatusCode::FORBIDDEN);
        assert_eq!(BackendError::not_found("gone").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            BackendError::MethodNotAllowed.status_code(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(BackendError::conflict("dup").status_code(), StatusCode::CONFLICT);
        assert_eq!(
            BackendError::internal("db down").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_message_is_generic() {
        let error = BackendError::internal("connection refused on 10.0.0.5:5432");
        assert_eq!(error.message(), INTERNAL_ERROR_MESSAGE);
        assert!(error.to_string().contains("connection refused"));
    }

    #[test]
    fn test_from_store_error() {
        let conflict: BackendError = StoreError::UniqueViolation.into();
        assert_eq!(conflict.status_code(), StatusCode::CONFLICT);

        let invalid: BackendError = StoreError::Validation("name too short".into()).into();
        assert_eq!(invalid.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(invalid.message(), "name too short");

        let internal: BackendError = StoreError::Backend("pool timed out".into()).into();
        assert_eq!(internal.message(), INTERNAL_ERROR_MESSAGE);
    }

    #[test]
    fn test_token_errors_are_indistinguishable() {
        let messages: Vec<String> = [TokenError::InvalidSignature, TokenError::Expired, TokenError::Malformed]
            .into_iter()
            .map(BackendError::from)
            .map(|e| {
                assert_eq!(e.status_code(), StatusCode::UNAUTHORIZED);
                e.message()
            })
            .collect();
        assert!(messages.iter().all(|m| m == &messages[0]));
    }
}
