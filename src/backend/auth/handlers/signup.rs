/**
 * Signup Handler
 *
 * This module implements the user registration handler for POST /signup.
 *
 * # Registration Process
 *
 * 1. Validate email format, password presence and profile fields
 * 2. Hash password using bcrypt
 * 3. Create the account; the store enforces email uniqueness
 * 4. Return the account (never the hash) with 201 Created
 *
 * Registration does not sign the user in; the client calls /signin next.
 */

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
};

use crate::backend::auth::handlers::types::SignupRequest;
use crate::backend::auth::users::{
    is_valid_email, Account, NewAccount, StoreError, DEFAULT_ABOUT, DEFAULT_AVATAR, DEFAULT_NAME,
};
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;

/// Sign up handler
///
/// # Errors
///
/// * `400 Bad Request` - malformed body, invalid email, empty password or invalid profile field
/// * `409 Conflict` - an account with this email already exists
/// * `500 Internal Server Error` - hashing or store failure
///
/// # Example Request
///
/// ```http
/// POST /signup HTTP/1.1
/// Content-Type: application/json
///
/// { "email": "a@b.com", "password": "secret1" }
/// ```
///
/// # Example Response
///
/// ```json
/// {
///   "_id": "123e4567-e89b-12d3-a456-426614174000",
///   "email": "a@b.com",
///   "name": "Jacques-Yves Cousteau",
///   "about": "Explorer",
///   "avatar": "https://pictures.s3.yandex.net/resources/jacques-cousteau_1604399756.png"
/// }
/// ```
pub async fn signup(
    State(state): State<AppState>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Account>), BackendError> {
    let Json(request) = payload?;

    if !is_valid_email(&request.email) {
        tracing::warn!("Signup rejected: invalid email format");
        return Err(BackendError::invalid_input("invalid email format"));
    }

    if request.password.is_empty() {
        tracing::warn!("Signup rejected: empty password");
        return Err(BackendError::invalid_input("password is required"));
    }

    let mut account = NewAccount {
        email: request.email,
        password_hash: String::new(),
        name: request.name.unwrap_or_else(|| DEFAULT_NAME.to_string()),
        about: request.about.unwrap_or_else(|| DEFAULT_ABOUT.to_string()),
        avatar: request.avatar.unwrap_or_else(|| DEFAULT_AVATAR.to_string()),
    };

    // Reject bad profile fields before paying for a hash
    account.validate()?;

    account.password_hash = state.passwords.hash(&request.password).await?;

    let created = state.store.create(account).await.map_err(|e| match e {
        StoreError::UniqueViolation => {
            tracing::warn!("Signup rejected: email already registered");
            BackendError::conflict("account already exists")
        }
        other => BackendError::from(other),
    })?;

    tracing::info!("Account created: {}", created.id);

    Ok((StatusCode::CREATED, Json(created)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::auth::users::AccountStore;
    use assert_matches::assert_matches;

    fn request(email: &str, password: &str) -> SignupRequest {
        SignupRequest {
            email: email.to_string(),
            password: password.to_string(),
            name: None,
            about: None,
            avatar: None,
        }
    }

    #[tokio::test]
    async fn test_signup_success() {
        let (state, store) = AppState::in_memory();

        let (status, Json(account)) =
            signup(State(state), Ok(Json(request("a@b.com", "secret1")))).await.unwrap();

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(account.email, "a@b.com");
        assert_eq!(account.name, DEFAULT_NAME);

        let creds = store.find_credentials_by_email("a@b.com").await.unwrap().unwrap();
        assert_ne!(creds.password_hash, "secret1");
        assert!(creds.password_hash.starts_with("$2"));
    }

    #[tokio::test]
    async fn test_signup_with_profile_fields() {
        let (state, _store) = AppState::in_memory();
        let mut req = request("a@b.com", "secret1");
        req.name = Some("Ada".into());
        req.about = Some("Engineer".into());
        req.avatar = Some("https://example.com/ada.png".into());

        let (_, Json(account)) = signup(State(state), Ok(Json(req))).await.unwrap();
        assert_eq!(account.name, "Ada");
        assert_eq!(account.about, "Engineer");
        assert_eq!(account.avatar, "https://example.com/ada.png");
    }

    #[tokio::test]
    async fn test_signup_invalid_email() {
        let (state, store) = AppState::in_memory();
        let result = signup(State(state), Ok(Json(request("invalid-email", "secret1")))).await;
        assert_matches!(result, Err(BackendError::InvalidInput(_)));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_signup_empty_password() {
        let (state, store) = AppState::in_memory();
        let result = signup(State(state), Ok(Json(request("a@b.com", "")))).await;
        assert_matches!(result, Err(BackendError::InvalidInput(_)));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_signup_invalid_profile() {
        let (state, store) = AppState::in_memory();
        let mut req = request("a@b.com", "secret1");
        req.name = Some("A".into());
        let result = signup(State(state), Ok(Json(req))).await;
        assert_matches!(result, Err(BackendError::InvalidInput(_)));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_signup_duplicate_email() {
        let (state, store) = AppState::in_memory();
        signup(State(state.clone()), Ok(Json(request("a@b.com", "secret1"))))
            .await
            .unwrap();

        let result = signup(State(state), Ok(Json(request("a@b.com", "other")))).await;
        assert_matches!(result, Err(BackendError::Conflict(m)) if m == "account already exists");
        assert_eq!(store.len().await, 1);
    }
}
