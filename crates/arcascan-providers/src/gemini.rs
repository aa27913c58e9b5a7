//! Google Gemini `generateContent` adapter.
//!
//! The credential travels as the `key` query parameter. The completion is the
//! first part of the first candidate.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use arcascan_core::types::ProviderKind;

use crate::http::{build_client, send_json};
use crate::registry::ProviderSettings;
use crate::traits::{CompletionProvider, ProviderError};

const PROVIDER: &str = "Gemini";

#[derive(Debug)]
pub struct GeminiProvider {
    client: reqwest::Client,
    settings: ProviderSettings,
}

impl GeminiProvider {
    pub fn new(settings: ProviderSettings) -> Self {
        Self {
            client: build_client(),
            settings,
        }
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.settings.api_base, self.settings.model
        )
    }
}

// ── Wire types ──

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: [TextPart<'a>; 1],
}

#[derive(Debug, Serialize)]
struct TextPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateResponse {
    fn first_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content
            .parts
            .into_iter()
            .next()?
            .text
    }
}

#[async_trait]
impl CompletionProvider for GeminiProvider {
    async fn submit(&self, prompt: &str, credential: &str) -> Result<String, ProviderError> {
        debug!(
            provider = PROVIDER,
            model = %self.settings.model,
            prompt_chars = prompt.len(),
            "Calling LLM"
        );

        let body = GenerateRequest {
            contents: [Content {
                parts: [TextPart { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: self.settings.temperature,
                max_output_tokens: self.settings.max_tokens,
            },
        };

        let request = self
            .client
            .post(self.generate_url())
            .query(&[("key", credential)])
            .json(&body);

        let response: GenerateResponse = send_json(request, PROVIDER).await?;
        let text = response
            .first_text()
            .ok_or_else(|| ProviderError::UnexpectedResponse {
                provider: PROVIDER,
                detail: "no text in candidates[0].content.parts[0]".into(),
            })?;

        debug!(provider = PROVIDER, chars = text.len(), "completion received");
        Ok(text)
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::Gemini
    }

    fn model(&self) -> &str {
        &self.settings.model
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
