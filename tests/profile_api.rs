//! Profile API integration tests

mod common;

use axum::http::StatusCode;
use mesto::backend::auth::users::{DEFAULT_ABOUT, DEFAULT_AVATAR, DEFAULT_NAME};
use pretty_assertions::assert_eq;
use serde_json::json;
use uuid::Uuid;

use common::*;

#[tokio::test]
async fn test_new_account_has_default_profile() {
    let app = TestApp::new();
    let user = create_test_user(&app, "a@b.com", "secret1").await;

    let me = app.get("/users/me", Some(&user.cookie())).await;
    assert_eq!(me.body["name"], DEFAULT_NAME);
    assert_eq!(me.body["about"], DEFAULT_ABOUT);
    assert_eq!(me.body["avatar"], DEFAULT_AVATAR);
}

#[tokio::test]
async fn test_list_and_fetch_users() {
    let app = TestApp::new();
    let alice = create_test_user(&app, "alice@b.com", "secret1").await;
    let bob = create_test_user(&app, "bob@b.com", "secret2").await;

    let list = app.get("/users", Some(&alice.cookie())).await;
    assert_eq!(list.status, StatusCode::OK);
    let emails: Vec<&str> = list
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|account| account["email"].as_str().unwrap())
        .collect();
    assert_eq!(emails, vec!["alice@b.com", "bob@b.com"]);

    let fetched = app
        .get(&format!("/users/{}", bob.id), Some(&alice.cookie()))
        .await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body["email"], "bob@b.com");

    let missing = app
        .get(&format!("/users/{}", Uuid::new_v4()), Some(&alice.cookie()))
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);

    let malformed = app.get("/users/not-a-uuid", Some(&alice.cookie())).await;
    assert_eq!(malformed.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_profile_and_avatar() {
    let app = TestApp::new();
    let user = create_test_user(&app, "a@b.com", "secret1").await;

    let updated = app
        .patch_json(
            "/users/me",
            json!({ "name": "Ada Lovelace", "about": "Mathematician" }),
            Some(&user.cookie()),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["name"], "Ada Lovelace");
    assert_eq!(updated.body["about"], "Mathematician");

    let avatar = app
        .patch_json(
            "/users/me/avatar",
            json!({ "avatar": "https://example.com/ada.png" }),
            Some(&user.cookie()),
        )
        .await;
    assert_eq!(avatar.status, StatusCode::OK);
    assert_eq!(avatar.body["avatar"], "https://example.com/ada.png");
    assert_eq!(avatar.body["name"], "Ada Lovelace");
}

#[tokio::test]
async fn test_update_profile_rejects_out_of_range_lengths() {
    let app = TestApp::new();
    let user = create_test_user(&app, "a@b.com", "secret1").await;

    for body in [
        json!({ "name": "A", "about": "Mathematician" }),
        json!({ "name": "Ada", "about": "x".repeat(31) }),
        json!({ "name": "Ada" }),
    ] {
        let response = app
            .patch_json("/users/me", body.clone(), Some(&user.cookie()))
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{}", body);
    }

    let bad_avatar = app
        .patch_json(
            "/users/me/avatar",
            json!({ "avatar": "javascript:alert(1)" }),
            Some(&user.cookie()),
        )
        .await;
    assert_eq!(bad_avatar.status, StatusCode::BAD_REQUEST);

    let me = app.get("/users/me", Some(&user.cookie())).await;
    assert_eq!(me.body["name"], DEFAULT_NAME);
    assert_eq!(me.body["avatar"], DEFAULT_AVATAR);
}

#[tokio::test]
async fn test_profile_update_requires_session() {
    let app = TestApp::new();
    create_test_user(&app, "a@b.com", "secret1").await;

    let response = app
        .patch_json("/users/me", json!({ "name": "Mallory", "about": "Intruder" }), None)
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_unsupported_method_is_405_with_message() {
    let app = TestApp::new();
    let user = create_test_user(&app, "a@b.com", "secret1").await;

    let response = app.put("/users/me", Some(&user.cookie())).await;
    assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(response.message(), "method not allowed");
}
