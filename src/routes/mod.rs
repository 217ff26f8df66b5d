//! HTTP routes for the gateway
//!
//! This module defines all HTTP endpoints exposed by the gateway.

pub mod chat;
pub mod documents;
pub mod health;
pub mod image;
pub mod metrics;
pub mod search;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use bytes::Bytes;
use tower_http::{
    catch_panic::CatchPanicLayer,
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::error;

use crate::{error::AppError, proxy::headers::attachment_disposition, AppState};

/// Create the main application router
pub fn create_router(state: Arc<AppState>) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let forwarding_routes = Router::new()
        .route("/deepseek/:query", get(chat::deepseek))
        .route("/openai/:query", get(chat::openai))
        .route("/google/:query", get(search::google))
        .route("/wikipedia/:query", get(search::wikipedia))
        .route("/generate-image/:prompt", get(image::generate_image));

    let document_routes = Router::new()
        .route("/upload-pdf/", post(documents::upload_pdf))
        .route("/upload-excel/", post(documents::upload_excel))
        .route("/generate-flowchart/", post(documents::generate_flowchart))
        .layer(DefaultBodyLimit::max(state.config.max_upload_bytes));

    let public_routes = Router::new()
        .route("/", get(health::root))
        .route("/favicon.ico", get(health::favicon))
        .route("/health", get(health::health_check))
        .route("/metrics", get(metrics::prometheus_metrics));

    Router::new()
        .merge(public_routes)
        .merge(forwarding_routes)
        .merge(document_routes)
        // Global middleware (applied to all routes)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Successful response that downloads as `filename`
pub fn attachment(content_type: &str, filename: &str, body: impl Into<Bytes>) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (header::CONTENT_DISPOSITION, attachment_disposition(filename)),
        ],
        body.into(),
    )
        .into_response()
}

/// Render a handler panic as a structured internal error
fn panic_response(panic: Box<dyn std::any::Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    error!(panic = detail, "Handler panicked");

    AppError::Internal(anyhow::anyhow!("handler panicked: {}", detail)).into_response()
}
