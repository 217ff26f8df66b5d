//! Header utilities for upstream requests and downloadable responses

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};

use crate::error::{AppError, AppResult};

/// Build the bearer authorization header for an upstream request
///
/// Client headers are never forwarded; the gateway only ever sends the
/// configured credential.
pub fn bearer_headers(api_key: &str) -> AppResult<HeaderMap> {
    let mut value = HeaderValue::from_str(&format!("Bearer {}", api_key)).map_err(|_| {
        AppError::Internal(anyhow::anyhow!("API key contains invalid header characters"))
    })?;
    value.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, value);
    Ok(headers)
}

/// `Content-Disposition` value that makes a response download as `filename`
pub fn attachment_disposition(filename: &str) -> String {
    let safe: String = filename
        .chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            c if c.is_ascii_graphic() || c == ' ' => c,
            _ => '_',
        })
        .collect();
    format!("attachment; filename=\"{}\"", safe)
}
