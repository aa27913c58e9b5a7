//! Anthropic Messages API adapter.
//!
//! Auth via `x-api-key` + `anthropic-version` headers; the completion is the
//! in-order concatenation of every `text` content block.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use arcascan_core::types::ProviderKind;

use crate::http::{build_client, send_json};
use crate::registry::ProviderSettings;
use crate::traits::{CompletionProvider, ProviderError};

/// API version pinned in the `anthropic-version` header.
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

const PROVIDER: &str = "Claude";

#[derive(Debug)]
pub struct AnthropicProvider {
    client: reqwest::Client,
    settings: ProviderSettings,
}

impl AnthropicProvider {
    pub fn new(settings: ProviderSettings) -> Self {
        Self {
            client: build_client(),
            settings,
        }
    }

    fn messages_url(&self) -> String {
        format!("{}/messages", self.settings.api_base)
    }
}

// ── Wire types ──

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
    messages: [UserMessage<'a>; 1],
}

#[derive(Debug, Serialize)]
struct UserMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    #[serde(default)]
    text: Option<String>,
}

impl MessagesResponse {
    fn into_text(self) -> String {
        self.content
            .into_iter()
            .filter(|block| block.block_type == "text")
            .filter_map(|block| block.text)
            .collect()
    }
}

#[async_trait]
impl CompletionProvider for AnthropicProvider {
    async fn submit(&self, prompt: &str, credential: &str) -> Result<String, ProviderError> {
        debug!(
            provider = PROVIDER,
            model = %self.settings.model,
            prompt_chars = prompt.len(),
            "Calling LLM"
        );

        let body = MessagesRequest {
            model: &self.settings.model,
            max_tokens: self.settings.max_tokens,
            temperature: self.settings.temperature,
            messages: [UserMessage {
                role: "user",
                content: prompt,
            }],
        };

        let request = self
            .client
            .post(self.messages_url())
            .header("x-api-key", credential)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body);

        let response: MessagesResponse = send_json(request, PROVIDER).await?;
        let text = response.into_text();
        debug!(provider = PROVIDER, chars = text.len(), "completion received");
        Ok(text)
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::Claude
    }

    fn model(&self) -> &str {
        &self.settings.model
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::spec;
    use arcascan_core::config::ProviderConfig;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider_for(server: &MockServer) -> AnthropicProvider {
        let config = ProviderConfig {
            api_base: Some(server.uri()),
            ..Default::default()
        };
        AnthropicProvider::new(spec(ProviderKind::Claude).resolve(&config))
    }

    #[test]
    fn test_messages_url() {
        let settings = spec(ProviderKind::Claude).resolve(&ProviderConfig::default());
        let provider = AnthropicProvider::new(settings);
        assert_eq!(provider.messages_url(), "https://api.anthropic.com/v1/messages");
    }

    #[tokio::test]
    async fn test_submit_concatenates_text_blocks() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/messages"))
            .and(header("x-api-key", "valid-key"))
            .and(header("anthropic-version", "2023-06-01"))
            .and(body_partial_json(serde_json::json!({
                "model": "claude-sonnet-4-20250514",
                "max_tokens": 4000,
                "messages": [{ "role": "user", "content": "hello" }]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "msg_1",
                "content": [
                    { "type": "text", "text": "{\"a\":" },
                    { "type": "tool_use", "id": "t1", "name": "x", "input": {} },
                    { "type": "text", "text": " 1}" }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let text = provider_for(&server).submit("hello", "valid-key").await.unwrap();
        assert_eq!(text, "{\"a\": 1}");
    }

    #[tokio::test]
    async fn test_submit_unauthorized() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/messages"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "type": "error",
                "error": { "type": "authentication_error", "message": "invalid x-api-key" }
            })))
            .mount(&server)
            .await;

        let err = provider_for(&server).submit("hello", "bad").await.unwrap_err();
        assert_eq!(err.status(), Some(reqwest::StatusCode::UNAUTHORIZED));
        assert!(err.to_string().contains("invalid x-api-key"));
    }

    #[tokio::test]
    async fn test_submit_empty_error_body_uses_status_text() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/messages"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = provider_for(&server).submit("hello", "k").await.unwrap_err();
        assert!(err.to_string().contains("Service Unavailable"));
    }

    #[tokio::test]
    async fn test_submit_missing_content_field() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/messages"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "id": "msg_2" })),
            )
            .mount(&server)
            .await;

        let err = provider_for(&server).submit("hello", "k").await.unwrap_err();
        assert!(matches!(err, ProviderError::UnexpectedResponse { .. }));
    }

    #[tokio::test]
    async fn test_submit_network_error() {
        let config = ProviderConfig {
            api_base: Some("http://127.0.0.1:1".into()),
            ..Default::default()
        };
        let provider = AnthropicProvider::new(spec(ProviderKind::Claude).resolve(&config));

        let err = provider.submit("hello", "k").await.unwrap_err();
        assert!(matches!(err, ProviderError::Request { .. }));
    }
}
