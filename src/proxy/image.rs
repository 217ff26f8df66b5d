//! Image generation through the Hugging Face inference API
//!
//! Generated bytes are handed back in memory under a per-request file name,
//! so concurrent generations never share an output path.

use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;
use tracing::{info, instrument};
use uuid::Uuid;

use super::{Gateway, Integration};
use crate::error::{AppError, AppResult};

/// Image returned by the upstream, ready to be served as a download
#[derive(Debug, Clone)]
pub struct GeneratedImage {
    pub bytes: Bytes,
    pub content_type: String,
    pub filename: String,
}

/// File extension for an image media type
fn extension_for(content_type: &str) -> Option<&'static str> {
    match content_type {
        "image/png" => Some("png"),
        "image/jpeg" | "image/jpg" => Some("jpg"),
        "image/webp" => Some("webp"),
        "image/gif" => Some("gif"),
        _ => None,
    }
}

impl Gateway {
    #[instrument(skip(self, integration, prompt), fields(integration = integration.name))]
    pub async fn generate_image(
        &self,
        integration: &Integration,
        prompt: &str,
    ) -> AppResult<GeneratedImage> {
        let response = self.forward(integration, prompt).await?;

        // Some inference backends omit the media type; their default is JPEG.
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(';').next())
            .map(|v| v.trim().to_ascii_lowercase())
            .unwrap_or_else(|| "image/jpeg".to_string());

        let extension = extension_for(&content_type).ok_or_else(|| {
            AppError::UpstreamError(format!("expected image bytes, got {}", content_type))
        })?;

        let bytes = response.bytes().await?;
        let filename = format!("image-{}.{}", Uuid::new_v4(), extension);

        info!(
            size = bytes.len(),
            content_type = %content_type,
            filename = %filename,
            "Image generated"
        );

        Ok(GeneratedImage {
            bytes,
            content_type,
            filename,
        })
    }
}
