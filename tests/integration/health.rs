//! Health endpoint integration tests
//!
//! - GET / - Liveness message
//! - GET /favicon.ico - Placeholder
//! - GET /health - Version, uptime and integration status
//! - GET /metrics - Prometheus exposition

use axum::http::StatusCode;
use serde_json::Value;

use crate::common::{Credentials, TestApp};

#[tokio::test]
async fn test_root_reports_running() {
    let app = TestApp::spawn(Credentials::Missing).await;

    let response = app.server.get("/").await;

    response.assert_status_ok();
    let json: Value = response.json();
    assert_eq!(json["message"], "AI Agent Backend is Running!");
}

#[tokio::test]
async fn test_favicon_placeholder() {
    let app = TestApp::spawn(Credentials::Missing).await;

    let response = app.server.get("/favicon.ico").await;

    response.assert_status_ok();
    let json: Value = response.json();
    assert_eq!(json["message"], "No favicon available");
}

#[tokio::test]
async fn test_health_lists_integration_status() {
    let app = TestApp::spawn(Credentials::Missing).await;

    let response = app.server.get("/health").await;

    response.assert_status_ok();
    let json: Value = response.json();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(json["integrations"]["deepseek"], false);
    assert_eq!(json["integrations"]["serpapi"], false);
    // Wikipedia needs no credential
    assert_eq!(json["integrations"]["wikipedia"], true);
}

#[tokio::test]
async fn test_health_with_credentials_configured() {
    let app = TestApp::spawn(Credentials::Configured).await;

    let json: Value = app.server.get("/health").await.json();

    for name in ["deepseek", "openai", "serpapi", "huggingface", "wikipedia"] {
        assert_eq!(json["integrations"][name], true, "{} should be enabled", name);
    }
}

#[tokio::test]
async fn test_cors_headers_are_sent() {
    let app = TestApp::spawn(Credentials::Missing).await;

    let response = app
        .server
        .get("/")
        .add_header(
            "Origin".parse::<axum::http::HeaderName>().unwrap(),
            "http://example.com".parse::<axum::http::HeaderValue>().unwrap(),
        )
        .await;

    response.assert_status_ok();
    assert_eq!(response.header("access-control-allow-origin"), "*");
}

#[tokio::test]
async fn test_metrics_endpoint_is_reachable() {
    let app = TestApp::spawn(Credentials::Missing).await;

    let response = app.server.get("/metrics").await;

    assert_eq!(response.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = TestApp::spawn(Credentials::Missing).await;

    let response = app.server.get("/does-not-exist").await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}
