//! OpenAI chat-completions adapter.
//!
//! Bearer auth; sends a system + user message pair and asks for a JSON object
//! response. The completion is `choices[0].message.content`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use arcascan_core::types::ProviderKind;

use crate::http::{build_client, send_json};
use crate::registry::ProviderSettings;
use crate::traits::{CompletionProvider, ProviderError};

/// System message sent ahead of the analysis prompt.
pub const SYSTEM_PROMPT: &str =
    "Você é um especialista em tráfego pago. Retorne APENAS JSON válido.";

const PROVIDER: &str = "ChatGPT";

#[derive(Debug)]
pub struct OpenAiProvider {
    client: reqwest::Client,
    settings: ProviderSettings,
}

impl OpenAiProvider {
    pub fn new(settings: ProviderSettings) -> Self {
        Self {
            client: build_client(),
            settings,
        }
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.settings.api_base)
    }
}

// ── Wire types ──

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    async fn submit(&self, prompt: &str, credential: &str) -> Result<String, ProviderError> {
        debug!(
            provider = PROVIDER,
            model = %self.settings.model,
            prompt_chars = prompt.len(),
            "Calling LLM"
        );

        let body = ChatRequest {
            model: &self.settings.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: self.settings.temperature,
            max_tokens: self.settings.max_tokens,
            response_format: ResponseFormat {
                format_type: "json_object",
            },
        };

        let request = self
            .client
            .post(self.completions_url())
            .bearer_auth(credential)
            .json(&body);

        let response: ChatResponse = send_json(request, PROVIDER).await?;
        let text = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::UnexpectedResponse {
                provider: PROVIDER,
                detail: "no choices in response".into(),
            })?
            .message
            .content
            .ok_or_else(|| ProviderError::UnexpectedResponse {
                provider: PROVIDER,
                detail: "first choice has no message content".into(),
            })?;

        debug!(provider = PROVIDER, chars = text.len(), "completion received");
        Ok(text)
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::Gpt
    }

    fn model(&self) -> &str {
        &self.settings.model
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
