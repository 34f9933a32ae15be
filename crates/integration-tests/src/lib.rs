//! Integration tests for the MotoShop storefront API.
//!
//! Tests drive the full axum router in process via [`tower::ServiceExt`]:
//! every request passes through routing, extractors, middleware, and the
//! real services, backed by a throwaway data directory per test.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p moto-shop-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::missing_panics_doc)]

use std::net::IpAddr;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use moto_shop_storefront::config::StorefrontConfig;
use moto_shop_storefront::state::AppState;

/// A storefront instance backed by a temporary data directory.
///
/// Simulated auth/checkout latencies are zeroed so tests run at full speed.
pub struct TestApp {
    router: Router,
    _data_dir: tempfile::TempDir,
}

impl TestApp {
    /// Spawn a fresh storefront with an empty cart and no logged-in user.
    #[must_use]
    pub fn new() -> Self {
        let data_dir = tempfile::tempdir().expect("failed to create temp data dir");
        let config = StorefrontConfig {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 0,
            data_dir: data_dir.path().to_path_buf(),
            auth_latency: Duration::ZERO,
            checkout_latency: Duration::ZERO,
        };
        let state = AppState::new(config).expect("failed to build app state");
        Self {
            router: moto_shop_storefront::app(state),
            _data_dir: data_dir,
        }
    }

    /// Send a GET request and decode the JSON body.
    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let (status, _, body) = self.get_with_headers(uri, &[]).await;
        (status, body)
    }

    /// Send a GET request with extra headers; returns the response headers
    /// alongside the decoded body.
    pub async fn get_with_headers(
        &self,
        uri: &str,
        headers: &[(&str, &str)],
    ) -> (StatusCode, HeaderMap, Value) {
        let mut builder = Request::builder().method(Method::GET).uri(uri);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        let request = builder.body(Body::empty()).expect("failed to build request");
        self.send(request).await
    }

    /// Send a POST request with a JSON body.
    pub async fn post(&self, uri: &str, body: &Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("failed to build request");
        let (status, _, body) = self.send(request).await;
        (status, body)
    }

    /// Send a bodyless POST request (logout, cart clear).
    pub async fn post_empty(&self, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .body(Body::empty())
            .expect("failed to build request");
        let (status, _, body) = self.send(request).await;
        (status, body)
    }

    /// Log in as the default test rider and return the user document.
    pub async fn login(&self) -> Value {
        let (status, user) = self
            .post(
                "/auth/login",
                &json!({"email": "rider@example.com", "password": "segredo"}),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {user}");
        user
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, HeaderMap, Value) {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("request failed");
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("failed to read response body")
            .to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            // Non-JSON bodies (e.g. the health check) come back as a string
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        (status, headers, body)
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}
