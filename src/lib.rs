//! Agent Gateway - HTTP gateway for AI agent integrations
//!
//! This library provides the core functionality for the gateway server. Each
//! endpoint checks that the credential it needs is configured, forwards
//! exactly one request to its upstream (chat completion, web search,
//! encyclopedia summary, image generation) or runs a local document helper,
//! and shapes the result into the response.

pub mod config;
pub mod documents;
pub mod error;
pub mod proxy;
pub mod routes;

use std::time::Instant;

use anyhow::Result;

pub use crate::config::{Config, Credentials};
pub use crate::error::{AppError, AppResult};
pub use crate::proxy::{Gateway, Integration, Integrations};

/// Application state shared across all request handlers
pub struct AppState {
    pub config: Config,
    pub start_time: Instant,
    /// Outbound client holding the credentials
    pub gateway: Gateway,
    /// One immutable descriptor per upstream
    pub integrations: Integrations,
}

impl AppState {
    /// Create a new application state
    pub fn new(config: Config) -> Result<Self> {
        let http_client = Gateway::http_client(&config)?;
        let gateway = Gateway::new(http_client, config.credentials.clone());
        let integrations = Integrations::from_config(&config)?;

        Ok(Self {
            config,
            start_time: Instant::now(),
            gateway,
            integrations,
        })
    }
}
