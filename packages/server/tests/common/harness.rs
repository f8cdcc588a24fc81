//! Test harness driving the real router in-process.
//!
//! Requests go through `tower::ServiceExt::oneshot`, so every middleware
//! layer (CORS, panic catching, tracing) is exercised without a socket.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use staysafe_core::kernel::{MockAI, TestDependencies};
use staysafe_core::server::build_app;
use tower::ServiceExt;

pub const FRONTEND_ORIGIN: &str = "http://localhost:3000";

pub struct TestHarness {
    pub app: Router,
    pub ai: Arc<MockAI>,
}

/// Decoded response
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Value,
}

impl TestHarness {
    pub fn new(ai: MockAI) -> Self {
        Self::with_deps(TestDependencies::new().mock_ai(ai))
    }

    pub fn with_deps(deps: TestDependencies) -> Self {
        // Run tests with: RUST_LOG=debug cargo test -- --nocapture
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let ai = deps.ai.clone();
        let app = build_app(deps.into_server_deps(), &[FRONTEND_ORIGIN.to_string()])
            .expect("router should build");
        Self { app, ai }
    }

    /// Wrap a router built with custom dependencies; `ai` is an unused mock.
    pub fn from_app(app: Router) -> Self {
        Self {
            app,
            ai: Arc::new(MockAI::new()),
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        let request = Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Body::empty())
            .expect("valid request");
        self.send(request).await
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> TestResponse {
        self.post_raw(uri, body.to_string()).await
    }

    pub async fn post_raw(&self, uri: &str, body: impl Into<String>) -> TestResponse {
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.into()))
            .expect("valid request");
        self.send(request).await
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should be readable");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };

        TestResponse {
            status,
            headers,
            body,
        }
    }
}
