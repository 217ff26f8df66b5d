//! Web search through SerpAPI
//!
//! The search payload is returned as-is.

use serde_json::Value;
use tracing::instrument;

use super::{Gateway, Integration};
use crate::error::AppResult;

impl Gateway {
    #[instrument(skip(self, integration, query), fields(integration = integration.name))]
    pub async fn search(&self, integration: &Integration, query: &str) -> AppResult<Value> {
        let response = self.forward(integration, query).await?;
        Ok(response.json().await?)
    }
}
