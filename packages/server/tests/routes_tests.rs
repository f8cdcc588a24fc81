//! Static routes and CORS behaviour.

mod common;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use serde_json::json;
use staysafe_core::kernel::MockAI;

use common::{TestHarness, FRONTEND_ORIGIN};

#[tokio::test]
async fn root_returns_greeting() {
    let harness = TestHarness::new(MockAI::new());

    let response = harness.get("/").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body,
        json!({ "message": "StaySafe API - Check product legality in Switzerland" })
    );
}

#[tokio::test]
async fn health_is_static() {
    let harness = TestHarness::new(MockAI::new());

    let response = harness.get("/health").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({ "status": "healthy" }));
    assert_eq!(harness.ai.call_count(), 0);
}

#[tokio::test]
async fn unknown_route_is_404() {
    let harness = TestHarness::new(MockAI::new());

    assert_eq!(harness.get("/nope").await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn preflight_from_configured_origin_is_allowed() {
    let harness = TestHarness::new(MockAI::new());

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/check-product")
        .header(header::ORIGIN, FRONTEND_ORIGIN)
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap();
    let response = harness.send(request).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.headers[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        FRONTEND_ORIGIN
    );
    assert_eq!(
        response.headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS],
        "true"
    );
}

#[tokio::test]
async fn other_origins_get_no_cors_headers() {
    let harness = TestHarness::new(MockAI::new());

    let request = Request::builder()
        .method(Method::GET)
        .uri("/health")
        .header(header::ORIGIN, "https://evil.example")
        .body(Body::empty())
        .unwrap();
    let response = harness.send(request).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response
        .headers
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());
}

#[test]
fn invalid_origin_fails_router_construction() {
    let deps = staysafe_core::kernel::TestDependencies::new().into_server_deps();

    assert!(staysafe_core::server::build_app(deps, &["bad\norigin".to_string()]).is_err());
}

#[test]
fn wildcard_origin_builds() {
    let deps = staysafe_core::kernel::TestDependencies::new().into_server_deps();

    assert!(staysafe_core::server::build_app(deps, &["*".to_string()]).is_ok());
}
