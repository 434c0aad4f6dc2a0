use crate::core::errors::FinanceError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

const CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Text completion used to turn spending figures into advice.
#[async_trait]
pub trait AdviceProvider: Send + Sync {
    fn model(&self) -> &str;
    /// Returns the first completion, `None` when the model answered nothing.
    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<Option<String>, FinanceError>;
}

pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
}

impl OpenAiClient {
    pub fn new(http: reqwest::Client, api_key: String, model: String) -> Result<Self, FinanceError> {
        if api_key.trim().is_empty() {
            return Err(FinanceError::ServiceUnavailable("OPENAI_API_KEY is empty".to_string()));
        }
        Ok(Self { http, api_key, model })
    }
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    content: Option<String>,
}

#[async_trait]
impl AdviceProvider for OpenAiClient {
    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<Option<String>, FinanceError> {
        let response = self
            .http
            .post(CHAT_COMPLETIONS_URL)
            .bearer_auth(&self.api_key)
            .json(&ChatRequest {
                model: &self.model,
                messages: [
                    ChatMessage {
                        role: "system",
                        content: system_prompt,
                    },
                    ChatMessage {
                        role: "user",
                        content: user_prompt,
                    },
                ],
            })
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| FinanceError::OpenAiError(e.to_string()))?
            .json::<ChatResponse>()
            .await
            .map_err(|e| FinanceError::OpenAiError(e.to_string()))?;

        Ok(response.choices.into_iter().next().and_then(|c| c.message.content))
    }
}
