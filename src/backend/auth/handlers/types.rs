/**
 * Authentication Handler Types
 *
 * Request and response bodies for sign-up, sign-in and sign-out.
 * Request types deliberately don't implement `Debug`: they hold plaintext
 * passwords.
 */

use serde::{Deserialize, Serialize};

/// Sign up request
///
/// Profile fields are optional and fall back to the account defaults.
#[derive(Deserialize)]
pub struct SignupRequest {
    /// Email address (must be unique)
    pub email: String,
    /// Plaintext password, hashed before storage
    pub password: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub about: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
}

/// Sign in request
#[derive(Deserialize)]
pub struct SigninRequest {
    pub email: String,
    /// Plaintext password, only compared against the stored hash
    pub password: String,
}

/// Sign in response
///
/// The same token is also set in the `jwt` cookie.
#[derive(Serialize, Deserialize, Debug)]
pub struct TokenResponse {
    pub token: String,
}

/// Plain acknowledgement
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}
