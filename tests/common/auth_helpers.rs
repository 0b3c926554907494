//! Authentication test helpers
//!
//! Account registration, sign-in and cookie handling on top of `TestApp`.

use axum::http::StatusCode;
use serde_json::json;

use super::TestApp;

/// Signed-in test account
pub struct TestUser {
    pub id: String,
    pub email: String,
    pub password: String,
    pub token: String,
}

impl TestUser {
    /// `Cookie` request header value carrying this session
    pub fn cookie(&self) -> String {
        session_cookie(&self.token)
    }
}

/// `Cookie` request header value for a token
pub fn session_cookie(token: &str) -> String {
    format!("jwt={}", token)
}

/// `name=value` pair of a `Set-Cookie` header
pub fn cookie_pair(set_cookie: &str) -> &str {
    set_cookie.split(';').next().unwrap_or_default()
}

/// Attributes of a `Set-Cookie` header without expiry fields, sorted
pub fn cookie_attributes(set_cookie: &str) -> Vec<String> {
    let mut attrs: Vec<String> = set_cookie
        .split(';')
        .skip(1)
        .map(|a| a.trim().to_string())
        .filter(|a| !a.starts_with("Max-Age") && !a.starts_with("Expires"))
        .collect();
    attrs.sort();
    attrs
}

/// Register and sign in, asserting both succeed
pub async fn create_test_user(app: &TestApp, email: &str, password: &str) -> TestUser {
    let signup = app
        .post_json("/signup", json!({ "email": email, "password": password }))
        .await;
    assert_eq!(signup.status, StatusCode::CREATED, "signup failed: {}", signup.body);

    let signin = app
        .post_json("/signin", json!({ "email": email, "password": password }))
        .await;
    assert_eq!(signin.status, StatusCode::OK, "signin failed: {}", signin.body);

    TestUser {
        id: signup.body["_id"].as_str().unwrap().to_string(),
        email: email.to_string(),
        password: password.to_string(),
        token: signin.body["token"].as_str().unwrap().to_string(),
    }
}

/// Replace the first signature character so the token no longer verifies
pub fn tamper_signature(token: &str) -> String {
    let (head, signature) = token.rsplit_once('.').unwrap();
    let mut chars = signature.chars();
    let first = chars.next().unwrap();
    let replacement = if first == 'A' { 'B' } else { 'A' };
    format!("{}.{}{}", head, replacement, chars.as_str())
}
