//! Liveness endpoints
//!
//! - `/` - Liveness message
//! - `/favicon.ico` - Static placeholder
//! - `/health` - Version, uptime and which integrations are configured

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::AppState;

/// Plain message payload
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub timestamp: String,
    /// Integration name -> whether its credential is available
    pub integrations: BTreeMap<String, bool>,
}

pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "AI Agent Backend is Running!".to_string(),
    })
}

pub async fn favicon() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "No favicon available".to_string(),
    })
}

/// Health check endpoint
///
/// Always healthy while the process is up; a missing credential only disables
/// the endpoints that need it, so it is reported rather than failing the check.
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let integrations = state
        .integrations
        .all()
        .into_iter()
        .map(|integration| {
            (
                integration.name.to_string(),
                state.gateway.is_configured(integration),
            )
        })
        .collect();

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        integrations,
    })
}
