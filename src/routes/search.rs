//! Search endpoints
//!
//! - `GET /google/:query` - raw SerpAPI result payload
//! - `GET /wikipedia/:query` - `{title, summary}` of the matching page

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;

use crate::{
    error::AppResult, proxy::WikipediaSummary, routes::metrics::observe, AppState,
};

pub async fn google(
    State(state): State<Arc<AppState>>,
    Path(query): Path<String>,
) -> AppResult<Json<Value>> {
    let integration = &state.integrations.serpapi;
    let start = Instant::now();
    let result = state.gateway.search(integration, &query).await;
    observe(integration.name, start, &result);
    result.map(Json)
}

pub async fn wikipedia(
    State(state): State<Arc<AppState>>,
    Path(query): Path<String>,
) -> AppResult<Json<WikipediaSummary>> {
    let integration = &state.integrations.wikipedia;
    let start = Instant::now();
    let result = state.gateway.wikipedia_summary(integration, &query).await;
    observe(integration.name, start, &result);
    result.map(Json)
}
