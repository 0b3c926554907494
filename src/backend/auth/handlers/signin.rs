/**
 * Sign-in Handler
 *
 * This module implements the authentication handler for POST /signin.
 *
 * # Authentication Process
 *
 * 1. Look up the stored credentials by email
 * 2. Verify the password with bcrypt
 * 3. Issue a session token
 * 4. Set the `jwt` cookie and return `{ "token": ... }`
 *
 * # Security
 *
 * - Unknown email and wrong password produce the same 401 and message
 * - Unknown emails still pay for one bcrypt verification
 * - Passwords and tokens are never logged
 */

use axum::{
    extract::{rejection::JsonRejection, State},
    http::HeaderMap,
    response::Json,
};

use crate::backend::auth::handlers::types::{SigninRequest, TokenResponse};
use crate::backend::error::{BackendError, INVALID_CREDENTIALS};
use crate::backend::server::state::AppState;

/// Sign in handler
///
/// # Errors
///
/// * `400 Bad Request` - malformed body
/// * `401 Unauthorized` - unknown email or wrong password (same message for both)
/// * `500 Internal Server Error` - store or token signing failure
///
/// # Example Request
///
/// ```http
/// POST /signin HTTP/1.1
/// Content-Type: application/json
///
/// { "email": "a@b.com", "password": "secret1" }
/// ```
///
/// # Example Response
///
/// ```http
/// HTTP/1.1 200 OK
/// Set-Cookie: jwt=eyJhbGciOiJIUzI1NiJ9...; Path=/; HttpOnly; SameSite=None; Secure
///
/// { "token": "eyJhbGciOiJIUzI1NiJ9..." }
/// ```
pub async fn signin(
    State(state): State<AppState>,
    payload: Result<Json<SigninRequest>, JsonRejection>,
) -> Result<(HeaderMap, Json<TokenResponse>), BackendError> {
    let Json(request) = payload?;

    let credentials = state
        .store
        .find_credentials_by_email(&request.email)
        .await
        .map_err(BackendError::from)?;

    let account_id = match credentials {
        Some(credentials) => {
            if !state
                .passwords
                .verify(&request.password, &credentials.password_hash)
                .await
            {
                tracing::warn!("Sign-in failed: password mismatch");
                return Err(BackendError::unauthorized(INVALID_CREDENTIALS));
            }
            credentials.account_id
        }
        None => {
            state.passwords.verify_dummy(&request.password).await;
            tracing::warn!("Sign-in failed: unknown email");
            return Err(BackendError::unauthorized(INVALID_CREDENTIALS));
        }
    };

    let token = state
        .tokens
        .issue(account_id)
        .map_err(|e| BackendError::internal(e.to_string()))?;

    let mut headers = HeaderMap::new();
    if !state.cookies.attach(&mut headers, &token) {
        return Err(BackendError::internal("session cookie could not be built"));
    }

    tracing::info!("Account signed in: {}", account_id);

    Ok((headers, Json(TokenResponse { token })))
}
