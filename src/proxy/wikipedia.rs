//! Encyclopedia summaries from the Wikipedia REST API

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::{ensure_success, Gateway, Integration};
use crate::error::AppResult;

/// Title and plain-text summary of a page
///
/// Both fields are empty when the page does not exist.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WikipediaSummary {
    pub title: String,
    pub summary: String,
}

#[derive(Debug, Deserialize)]
struct PageSummary {
    #[serde(default)]
    title: String,
    #[serde(default)]
    extract: String,
}

/// Page titles use underscores in place of spaces
fn page_title(query: &str) -> String {
    query.trim().replace(' ', "_")
}

impl Gateway {
    #[instrument(skip(self, integration), fields(integration = integration.name))]
    pub async fn wikipedia_summary(
        &self,
        integration: &Integration,
        query: &str,
    ) -> AppResult<WikipediaSummary> {
        let response = self.send(integration, &page_title(query)).await?;

        if response.status() == StatusCode::NOT_FOUND {
            debug!("Page not found, returning empty summary");
            return Ok(WikipediaSummary::default());
        }

        let page: PageSummary = ensure_success(integration, response).await?.json().await?;

        Ok(WikipediaSummary {
            title: page.title,
            summary: page.extract,
        })
    }
}
