//! Prometheus metrics endpoint
//!
//! Exposes per-integration request counters and latencies in Prometheus
//! format, and logs the outcome of every forwarded operation.

use std::time::Instant;

use axum::response::IntoResponse;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::Lazy;
use tracing::{info, warn};

use crate::error::AppResult;

/// Global Prometheus handle for metrics export
static PROMETHEUS_HANDLE: Lazy<Option<PrometheusHandle>> = Lazy::new(|| {
    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => Some(handle),
        Err(e) => {
            warn!(error = %e, "Failed to install Prometheus recorder");
            None
        }
    }
});

/// Initialize metrics (call once at startup)
pub fn init_metrics() {
    Lazy::force(&PROMETHEUS_HANDLE);

    metrics::describe_counter!(
        "gateway_requests_total",
        "Total number of gateway operations by integration and outcome"
    );
    metrics::describe_histogram!(
        "gateway_request_duration_seconds",
        "Duration of gateway operations in seconds"
    );
}

/// Prometheus metrics endpoint handler
pub async fn prometheus_metrics() -> impl IntoResponse {
    PROMETHEUS_HANDLE
        .as_ref()
        .map(PrometheusHandle::render)
        .unwrap_or_default()
}

/// Record a finished operation
pub fn record_request(integration: &str, status: &str, duration_secs: f64) {
    metrics::counter!(
        "gateway_requests_total",
        "integration" => integration.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!(
        "gateway_request_duration_seconds",
        "integration" => integration.to_string()
    )
    .record(duration_secs);
}

/// Record and log the result of an operation started at `start`
pub fn observe<T>(integration: &str, start: Instant, result: &AppResult<T>) {
    let duration = start.elapsed().as_secs_f64();

    match result {
        Ok(_) => {
            record_request(integration, "success", duration);
            info!(
                integration,
                duration_ms = %format!("{:.2}", duration * 1000.0),
                "Request completed"
            );
        }
        Err(e) => {
            record_request(integration, e.code(), duration);
            warn!(
                integration,
                code = e.code(),
                error = %e,
                duration_ms = %format!("{:.2}", duration * 1000.0),
                "Request failed"
            );
        }
    }
}
