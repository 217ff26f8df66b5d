//! Integration descriptors
//!
//! Each upstream the gateway talks to is described by an immutable
//! [`Integration`] built once from [`Config`]. A descriptor says where the
//! request goes, which credential it needs, how that credential is attached
//! and where the caller's input lands in the outbound request.

use anyhow::{bail, Context};
use reqwest::{Method, Url};

use crate::{
    config::{credential, Config},
    error::{AppError, AppResult},
};

/// How a credential is attached to the outbound request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthScheme {
    /// No credential is sent
    None,
    /// `Authorization: Bearer <secret>`
    Bearer,
    /// Secret sent as the named query parameter
    QueryParam(&'static str),
}

/// Where the caller's input is placed in the outbound request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestTemplate {
    /// Chat-completion body carrying a single user message
    ChatCompletion { model: String },
    /// `{"inputs": <input>}` as used by hosted inference endpoints
    Inference,
    /// Input sent as the named query parameter
    Query(&'static str),
    /// Input appended to the URL as one percent-encoded path segment
    PathSegment,
}

/// Immutable description of one upstream integration
#[derive(Debug, Clone)]
pub struct Integration {
    pub name: &'static str,
    pub url: Url,
    pub credential: Option<&'static str>,
    pub method: Method,
    pub auth: AuthScheme,
    pub template: RequestTemplate,
}

impl Integration {
    /// Resolve the final URL for `input`
    pub fn endpoint(&self, input: &str) -> AppResult<Url> {
        let mut url = self.url.clone();

        if self.template == RequestTemplate::PathSegment {
            url.path_segments_mut()
                .map_err(|_| {
                    AppError::Internal(anyhow::anyhow!("{} URL cannot take a path", self.name))
                })?
                .pop_if_empty()
                .push(input);
        }

        Ok(url)
    }
}

/// Parse `base` joined with `path`, naming the offending variable on failure
fn endpoint_url(variable: &str, base: &str, path: &str) -> anyhow::Result<Url> {
    let joined = format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'));
    let url = Url::parse(&joined).with_context(|| format!("Invalid {}: {}", variable, base))?;

    if url.cannot_be_a_base() {
        bail!("Invalid {}: {} cannot carry a path", variable, base);
    }

    Ok(url)
}

/// Every integration the gateway exposes, one per route
#[derive(Debug, Clone)]
pub struct Integrations {
    pub deepseek: Integration,
    pub openai: Integration,
    pub serpapi: Integration,
    pub huggingface: Integration,
    pub wikipedia: Integration,
}

impl Integrations {
    /// Build every descriptor, failing on a malformed base URL
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Ok(Self {
            deepseek: Integration {
                name: "deepseek",
                url: endpoint_url("DEEPSEEK_API_URL", &config.deepseek_api_url, "chat/completions")?,
                credential: Some(credential::DEEPSEEK_API_KEY),
                method: Method::POST,
                auth: AuthScheme::Bearer,
                template: RequestTemplate::ChatCompletion {
                    model: config.deepseek_model.clone(),
                },
            },
            openai: Integration {
                name: "openai",
                url: endpoint_url("OPENAI_API_URL", &config.openai_api_url, "chat/completions")?,
                credential: Some(credential::OPENAI_API_KEY),
                method: Method::POST,
                auth: AuthScheme::Bearer,
                template: RequestTemplate::ChatCompletion {
                    model: config.openai_model.clone(),
                },
            },
            serpapi: Integration {
                name: "serpapi",
                url: endpoint_url("SERPAPI_URL", &config.serpapi_url, "search.json")?,
                credential: Some(credential::SERPAPI_KEY),
                method: Method::GET,
                auth: AuthScheme::QueryParam("api_key"),
                template: RequestTemplate::Query("q"),
            },
            huggingface: Integration {
                name: "huggingface",
                url: endpoint_url(
                    "HUGGINGFACE_API_URL",
                    &config.huggingface_api_url,
                    &format!("models/{}", config.huggingface_model),
                )?,
                credential: Some(credential::HUGGINGFACE_API_KEY),
                method: Method::POST,
                auth: AuthScheme::Bearer,
                template: RequestTemplate::Inference,
            },
            wikipedia: Integration {
                name: "wikipedia",
                url: endpoint_url("WIKIPEDIA_API_URL", &config.wikipedia_api_url, "page/summary")?,
                credential: None,
                method: Method::GET,
                auth: AuthScheme::None,
                template: RequestTemplate::PathSegment,
            },
        })
    }

    pub fn all(&self) -> [&Integration; 5] {
        [
            &self.deepseek,
            &self.openai,
            &self.serpapi,
            &self.huggingface,
            &self.wikipedia,
        ]
    }
}
