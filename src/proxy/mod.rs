//! Proxy module
//!
//! Forwards exactly one request per inbound call to the upstream named by an
//! [`Integration`] descriptor. Typed wrappers for each upstream live in the
//! submodules as additional `impl Gateway` blocks.

pub mod chat;
pub mod headers;
pub mod image;
pub mod integration;
pub mod search;
pub mod wikipedia;

use std::time::Duration;

use reqwest::{RequestBuilder, Response};
use serde_json::json;
use tracing::{debug, error, instrument, warn};

use crate::{
    config::{Config, Credentials},
    error::{AppError, AppResult},
};

pub use chat::ChatReply;
pub use image::GeneratedImage;
pub use integration::{AuthScheme, Integration, Integrations, RequestTemplate};
pub use wikipedia::WikipediaSummary;

/// `User-Agent` sent on every upstream call; Wikimedia rejects anonymous clients
pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Outbound half of the gateway: one pooled HTTP client plus the credentials
pub struct Gateway {
    client: reqwest::Client,
    credentials: Credentials,
}

impl Gateway {
    pub fn new(client: reqwest::Client, credentials: Credentials) -> Self {
        Self {
            client,
            credentials,
        }
    }

    /// Build the shared HTTP client used for every upstream call
    pub fn http_client(config: &Config) -> reqwest::Result<reqwest::Client> {
        reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .pool_max_idle_per_host(32)
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
    }

    /// Whether the credential an integration needs is available
    pub fn is_configured(&self, integration: &Integration) -> bool {
        integration
            .credential
            .map_or(true, |name| self.credentials.contains(name))
    }

    /// Look up the integration's credential, failing before any network I/O
    fn credential(&self, integration: &Integration) -> AppResult<Option<&str>> {
        let Some(name) = integration.credential else {
            return Ok(None);
        };

        match self.credentials.get(name) {
            Some(secret) => Ok(Some(secret)),
            None => {
                warn!(
                    integration = integration.name,
                    credential = name,
                    "Credential missing, skipping upstream call"
                );
                Err(AppError::NotConfigured {
                    integration: integration.name,
                    credential: name,
                })
            }
        }
    }

    /// Build the single outbound request for `input`
    pub fn build_request(&self, integration: &Integration, input: &str) -> AppResult<RequestBuilder> {
        let secret = self.credential(integration)?;
        let url = integration.endpoint(input)?;

        let mut builder = self.client.request(integration.method.clone(), url);

        builder = match (integration.auth, secret) {
            (AuthScheme::Bearer, Some(secret)) => builder.headers(headers::bearer_headers(secret)?),
            (AuthScheme::QueryParam(param), Some(secret)) => builder.query(&[(param, secret)]),
            _ => builder,
        };

        builder = match &integration.template {
            RequestTemplate::ChatCompletion { model } => builder.json(&json!({
                "model": model,
                "messages": [{ "role": "user", "content": input }],
            })),
            RequestTemplate::Inference => builder.json(&json!({ "inputs": input })),
            RequestTemplate::Query(param) => builder.query(&[(*param, input)]),
            RequestTemplate::PathSegment => builder,
        };

        Ok(builder)
    }

    /// Send the request and return the upstream response whatever its status
    #[instrument(skip(self, integration, input), fields(integration = integration.name))]
    pub async fn send(&self, integration: &Integration, input: &str) -> AppResult<Response> {
        let request = self.build_request(integration, input)?;

        let response = request.send().await.map_err(|e| {
            let err = AppError::from(e);
            error!(error = %err, "Failed to reach upstream");
            err
        })?;

        debug!(status = %response.status(), "Received upstream response");
        Ok(response)
    }

    /// Send the request, turning a non-success status into an error that
    /// carries the upstream's own text
    pub async fn forward(&self, integration: &Integration, input: &str) -> AppResult<Response> {
        let response = self.send(integration, input).await?;
        ensure_success(integration, response).await
    }
}

/// Pass a successful response through, or capture the upstream's error text
pub async fn ensure_success(integration: &Integration, response: Response) -> AppResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let message = match text.trim() {
        "" => status
            .canonical_reason()
            .unwrap_or("Upstream returned an error")
            .to_string(),
        trimmed => trimmed.to_string(),
    };

    warn!(
        integration = integration.name,
        status = status.as_u16(),
        "Upstream rejected request"
    );

    Err(AppError::UpstreamRejected {
        integration: integration.name,
        status: status.as_u16(),
        message,
    })
}
