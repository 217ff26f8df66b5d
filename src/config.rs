//! Configuration management for the gateway
//!
//! Configuration is loaded once from environment variables (optionally seeded
//! from a `.env` file) and then passed to every component. Handlers never read
//! the environment themselves.

use std::collections::HashMap;
use std::env;
use std::fmt;

use anyhow::{Context, Result};

/// Names of the credentials the gateway knows how to use
pub mod credential {
    pub const DEEPSEEK_API_KEY: &str = "DEEPSEEK_API_KEY";
    pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
    pub const SERPAPI_KEY: &str = "SERPAPI_KEY";
    pub const HUGGINGFACE_API_KEY: &str = "HUGGINGFACE_API_KEY";

    pub const ALL: [&str; 4] = [
        DEEPSEEK_API_KEY,
        OPENAI_API_KEY,
        SERPAPI_KEY,
        HUGGINGFACE_API_KEY,
    ];
}

/// Read-only mapping from credential name to secret
///
/// A credential that is unset or set to an empty string is treated as absent.
#[derive(Clone, Default)]
pub struct Credentials {
    secrets: HashMap<&'static str, String>,
}

impl Credentials {
    /// Collect every known credential through `lookup`
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let secrets = credential::ALL
            .iter()
            .filter_map(|name| {
                lookup(name)
                    .map(|value| value.trim().to_string())
                    .filter(|value| !value.is_empty())
                    .map(|value| (*name, value))
            })
            .collect();

        Self { secrets }
    }

    /// Get the secret for a credential, if configured
    pub fn get(&self, name: &str) -> Option<&str> {
        self.secrets.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.secrets.contains_key(name)
    }
}

// Secrets never reach logs; only the configured names are shown.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.secrets.keys().collect();
        names.sort();
        f.debug_struct("Credentials")
            .field("configured", &names)
            .finish()
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,

    /// Timeout applied to every outbound call (in seconds)
    pub request_timeout_seconds: u64,
    /// Largest accepted request body (uploads included)
    pub max_upload_bytes: usize,

    /// DeepSeek API base URL
    pub deepseek_api_url: String,
    /// Model requested from DeepSeek
    pub deepseek_model: String,

    /// OpenAI API base URL
    pub openai_api_url: String,
    /// Model requested from OpenAI
    pub openai_model: String,

    /// SerpAPI base URL
    pub serpapi_url: String,

    /// Hugging Face inference base URL
    pub huggingface_api_url: String,
    /// Image generation model hosted on Hugging Face
    pub huggingface_model: String,

    /// Wikipedia REST API base URL
    pub wikipedia_api_url: String,

    /// Upstream API credentials
    pub credentials: Credentials,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(Self {
            host: var("GATEWAY_HOST", "0.0.0.0"),
            port: var("GATEWAY_PORT", "8000")
                .parse()
                .context("Invalid GATEWAY_PORT")?,

            request_timeout_seconds: var("GATEWAY_REQUEST_TIMEOUT_SECONDS", "60")
                .parse()
                .context("Invalid GATEWAY_REQUEST_TIMEOUT_SECONDS")?,
            max_upload_bytes: var("GATEWAY_MAX_UPLOAD_BYTES", "10485760")
                .parse()
                .context("Invalid GATEWAY_MAX_UPLOAD_BYTES")?,

            deepseek_api_url: var("DEEPSEEK_API_URL", "https://api.deepseek.com/v1"),
            deepseek_model: var("DEEPSEEK_MODEL", "deepseek-chat"),

            openai_api_url: var("OPENAI_API_URL", "https://api.openai.com/v1"),
            openai_model: var("OPENAI_MODEL", "gpt-4o-mini"),

            serpapi_url: var("SERPAPI_URL", "https://serpapi.com"),

            huggingface_api_url: var(
                "HUGGINGFACE_API_URL",
                "https://api-inference.huggingface.co",
            ),
            huggingface_model: var("HUGGINGFACE_MODEL", "CompVis/stable-diffusion-v1-4"),

            wikipedia_api_url: var("WIKIPEDIA_API_URL", "https://en.wikipedia.org/api/rest_v1"),

            credentials: Credentials::from_lookup(&lookup),
        })
    }
}
