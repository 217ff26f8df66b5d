//! Chat-completion upstreams (DeepSeek, OpenAI)
//!
//! Both speak the OpenAI wire format; only the reply text is returned.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::{Gateway, Integration};
use crate::error::{AppError, AppResult};

/// Reply text narrowed out of a chat-completion envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    pub response: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatCompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

impl ChatCompletionResponse {
    fn into_reply(self) -> AppResult<ChatReply> {
        let choice = self.choices.into_iter().next().ok_or_else(|| {
            AppError::UpstreamError("chat completion contained no choices".to_string())
        })?;

        Ok(ChatReply {
            response: choice.message.content.unwrap_or_default(),
        })
    }
}

impl Gateway {
    /// Forward `query` as a single user message and return the reply text
    #[instrument(skip(self, integration, query), fields(integration = integration.name))]
    pub async fn chat(&self, integration: &Integration, query: &str) -> AppResult<ChatReply> {
        let response = self.forward(integration, query).await?;
        let completion: ChatCompletionResponse = response.json().await?;
        completion.into_reply()
    }
}
