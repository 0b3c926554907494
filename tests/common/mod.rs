//! Common test utilities and helpers
//!
//! Builds the full router over an in-memory store and drives it with
//! `tower::ServiceExt::oneshot`, so integration tests exercise the same
//! layers as the server binary without a network or a database.

#![allow(dead_code)]

pub mod auth_helpers;

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use mesto::backend::auth::passwords::MIN_COST;
use mesto::backend::auth::{MemoryAccountStore, PasswordHasher, TokenCodec};
use mesto::backend::cards::MemoryCardStore;
use mesto::backend::routes::create_router;
use mesto::backend::server::{AppState, AuthConfig};
use serde_json::Value;
use tower::ServiceExt;

pub use auth_helpers::*;

pub const CLIENT_ORIGIN: &str = "http://localhost:3010";

/// Router plus handles on the pieces tests need to inspect
pub struct TestApp {
    pub router: Router,
    pub store: MemoryAccountStore,
    pub cards: MemoryCardStore,
    pub tokens: TokenCodec,
}

/// Response reduced to what assertions look at
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    /// The `Set-Cookie` header, if one was sent
    pub fn set_cookie(&self) -> Option<&str> {
        self.headers
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
    }

    /// The `message` field of an error or acknowledgement body
    pub fn message(&self) -> &str {
        self.body["message"].as_str().unwrap_or_default()
    }
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(AuthConfig::development())
    }

    pub fn with_config(config: AuthConfig) -> Self {
        let store = MemoryAccountStore::new();
        let cards = MemoryCardStore::new();
        let state = AppState::with_hasher(
            &config,
            Arc::new(store.clone()),
            Arc::new(cards.clone()),
            PasswordHasher::with_cost(MIN_COST),
        );
        Self {
            router: create_router(state, &[CLIENT_ORIGIN.to_string()]),
            store,
            cards,
            tokens: TokenCodec::new(&config),
        }
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> TestResponse {
        self.send(json_request(Method::POST, uri, body, None)).await
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> TestResponse {
        self.send(empty_request(Method::GET, uri, cookie)).await
    }

    pub async fn patch_json(&self, uri: &str, body: Value, cookie: Option<&str>) -> TestResponse {
        self.send(json_request(Method::PATCH, uri, body, cookie)).await
    }

    pub async fn post_json_as(&self, uri: &str, body: Value, cookie: &str) -> TestResponse {
        self.send(json_request(Method::POST, uri, body, Some(cookie))).await
    }

    pub async fn put(&self, uri: &str, cookie: Option<&str>) -> TestResponse {
        self.send(empty_request(Method::PUT, uri, cookie)).await
    }

    pub async fn delete(&self, uri: &str, cookie: Option<&str>) -> TestResponse {
        self.send(empty_request(Method::DELETE, uri, cookie)).await
    }
}

pub fn json_request(method: Method, uri: &str, body: Value, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn empty_request(method: Method, uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}
