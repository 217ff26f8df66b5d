//! Error types for the gateway
//!
//! Every handler returns `AppResult`, so each failure is rendered at the
//! operation boundary as a structured JSON payload.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::documents::DocumentError;

/// Application-level errors
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{credential} is not configured, the {integration} integration is disabled")]
    NotConfigured {
        integration: &'static str,
        credential: &'static str,
    },

    #[error("{integration} rejected the request with status {status}: {message}")]
    UpstreamRejected {
        integration: &'static str,
        status: u16,
        message: String,
    },

    #[error("Upstream request failed: {0}")]
    HttpError(reqwest::Error),

    #[error("Unexpected upstream response: {0}")]
    UpstreamError(String),

    #[error(transparent)]
    Processing(#[from] DocumentError),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

// Request URLs may carry query-string credentials, so they are stripped
// before the error can be logged or rendered.
impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::HttpError(err.without_url())
    }
}

impl AppError {
    /// Error for a rejected request extractor, keeping an oversize body
    /// distinct from a malformed one
    pub fn rejected(status: StatusCode, message: String) -> Self {
        if status == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge(message)
        } else {
            AppError::BadRequest(message)
        }
    }

    /// Machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            AppError::NotConfigured { .. } => "NOT_CONFIGURED",
            AppError::UpstreamRejected { .. } => "UPSTREAM_REJECTED",
            AppError::HttpError(_) | AppError::UpstreamError(_) => "UPSTREAM_ERROR",
            AppError::Processing(_) => "PROCESSING_ERROR",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::PayloadTooLarge(_) => "PAYLOAD_TOO_LARGE",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// HTTP status used when rendering this error
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotConfigured { .. } => StatusCode::SERVICE_UNAVAILABLE,
            AppError::UpstreamRejected { .. }
            | AppError::HttpError(_)
            | AppError::UpstreamError(_) => StatusCode::BAD_GATEWAY,
            AppError::Processing(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

/// Error details
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    /// Status returned by the upstream when it rejected the request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upstream_status: Option<u16>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (message, upstream_status) = match &self {
            // The upstream's own text is passed through untranslated
            AppError::UpstreamRejected {
                status, message, ..
            } => (message.clone(), Some(*status)),
            AppError::Internal(_) => ("Internal server error".to_string(), None),
            _ => (self.to_string(), None),
        };

        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code().to_string(),
                message,
                upstream_status,
            },
        };

        (self.status(), Json(body)).into_response()
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;
