//! Image generation endpoint integration tests
//!
//! - GET /generate-image/:prompt

use std::future::IntoFuture;

use agent_gateway::error::ErrorResponse;
use axum::http::StatusCode;

use crate::common::{Credentials, TestApp};

fn disposition_filename(disposition: &str) -> &str {
    disposition
        .split("filename=\"")
        .nth(1)
        .and_then(|rest| rest.strip_suffix('"'))
        .expect("Content-Disposition should carry a filename")
}

#[tokio::test]
async fn test_image_is_returned_as_download() {
    let app = TestApp::spawn(Credentials::Configured).await;
    let png = b"\x89PNG\r\n\x1a\nfake-image".to_vec();
    app.upstream.mock_image("a red crab", "image/png", png.clone()).await;

    let response = app.server.get("/generate-image/a%20red%20crab").await;

    response.assert_status_ok();
    assert_eq!(response.header("content-type"), "image/png");
    assert_eq!(response.as_bytes().as_ref(), png.as_slice());

    let disposition = response.header("content-disposition");
    let disposition = disposition.to_str().unwrap();
    assert!(disposition.starts_with("attachment;"));
    let filename = disposition_filename(disposition);
    assert!(filename.starts_with("image-"));
    assert!(filename.ends_with(".png"));
}

#[tokio::test]
async fn test_concurrent_generations_do_not_share_output() {
    let app = TestApp::spawn(Credentials::Configured).await;
    app.upstream
        .mock_image("cat", "image/png", b"cat-image-bytes".to_vec())
        .await;
    app.upstream
        .mock_image("dog", "image/jpeg", b"dog-image-bytes".to_vec())
        .await;

    let (cat, dog) = tokio::join!(
        app.server.get("/generate-image/cat").into_future(),
        app.server.get("/generate-image/dog").into_future(),
    );

    cat.assert_status_ok();
    dog.assert_status_ok();
    assert_eq!(cat.as_bytes().as_ref(), b"cat-image-bytes");
    assert_eq!(dog.as_bytes().as_ref(), b"dog-image-bytes");

    let cat_disposition = cat.header("content-disposition");
    let dog_disposition = dog.header("content-disposition");
    let cat_name = disposition_filename(cat_disposition.to_str().unwrap());
    let dog_name = disposition_filename(dog_disposition.to_str().unwrap());
    assert_ne!(cat_name, dog_name);
    assert!(dog_name.ends_with(".jpg"));
}

#[tokio::test]
async fn test_repeated_prompt_gets_fresh_filename() {
    let app = TestApp::spawn(Credentials::Configured).await;
    app.upstream
        .mock_image("same", "image/png", b"same-bytes".to_vec())
        .await;

    let first = app.server.get("/generate-image/same").await;
    let second = app.server.get("/generate-image/same").await;

    assert_ne!(
        first.header("content-disposition"),
        second.header("content-disposition")
    );
}

#[tokio::test]
async fn test_missing_key_makes_no_upstream_call() {
    let app = TestApp::spawn(Credentials::Missing).await;
    app.upstream.expect_no_calls().await;

    let response = app.server.get("/generate-image/cat").await;

    assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    let body: ErrorResponse = response.json();
    assert_eq!(body.error.code, "NOT_CONFIGURED");
    assert!(body.error.message.contains("HUGGINGFACE_API_KEY"));
}

#[tokio::test]
async fn test_model_loading_error_text_is_passed_through() {
    let app = TestApp::spawn(Credentials::Configured).await;
    app.upstream
        .mock_rejection(
            "huggingface",
            503,
            r#"{"error":"Model is currently loading","estimated_time":20.0}"#,
        )
        .await;

    let response = app.server.get("/generate-image/cat").await;

    assert_eq!(response.status_code(), StatusCode::BAD_GATEWAY);
    let body: ErrorResponse = response.json();
    assert_eq!(body.error.code, "UPSTREAM_REJECTED");
    assert!(body.error.message.contains("Model is currently loading"));
    assert_eq!(body.error.upstream_status, Some(503));
}

#[tokio::test]
async fn test_non_image_success_is_an_error_payload() {
    let app = TestApp::spawn(Credentials::Configured).await;
    app.upstream
        .mock_image("cat", "application/json", br#"{"unexpected":true}"#.to_vec())
        .await;

    let response = app.server.get("/generate-image/cat").await;

    assert_eq!(response.status_code(), StatusCode::BAD_GATEWAY);
    let body: ErrorResponse = response.json();
    assert_eq!(body.error.code, "UPSTREAM_ERROR");
}
