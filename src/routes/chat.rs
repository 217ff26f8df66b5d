//! Chat endpoints
//!
//! `GET /deepseek/:query` and `GET /openai/:query` forward the query as a
//! single user message and return only the reply text.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    error::AppResult,
    proxy::{ChatReply, Integration},
    routes::metrics::observe,
    AppState,
};

pub async fn deepseek(
    State(state): State<Arc<AppState>>,
    Path(query): Path<String>,
) -> AppResult<Json<ChatReply>> {
    complete(&state, &state.integrations.deepseek, &query).await
}

pub async fn openai(
    State(state): State<Arc<AppState>>,
    Path(query): Path<String>,
) -> AppResult<Json<ChatReply>> {
    complete(&state, &state.integrations.openai, &query).await
}

async fn complete(
    state: &AppState,
    integration: &Integration,
    query: &str,
) -> AppResult<Json<ChatReply>> {
    let start = Instant::now();
    let result = state.gateway.chat(integration, query).await;
    observe(integration.name, start, &result);
    result.map(Json)
}
