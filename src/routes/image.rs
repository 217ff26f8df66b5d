//! Image generation endpoint

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Path, State},
    response::Response,
};

use crate::{
    error::AppResult,
    routes::{attachment, metrics::observe},
    AppState,
};

/// `GET /generate-image/:prompt`
///
/// Returns the generated image as a download with a per-request file name.
pub async fn generate_image(
    State(state): State<Arc<AppState>>,
    Path(prompt): Path<String>,
) -> AppResult<Response> {
    let integration = &state.integrations.huggingface;
    let start = Instant::now();
    let result = state.gateway.generate_image(integration, &prompt).await;
    observe(integration.name, start, &result);

    let image = result?;
    Ok(attachment(&image.content_type, &image.filename, image.bytes))
}
