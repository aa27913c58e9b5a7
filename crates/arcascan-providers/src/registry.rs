//! Provider registry — static specs for the three supported LLM providers.
//!
//! Each `ProviderSpec` describes how to reach one provider and how it is
//! presented to the user: display names, where to get a key, env var,
//! default endpoint and generation parameters.

use arcascan_core::config::ProviderConfig;
use arcascan_core::types::ProviderKind;

use crate::anthropic::AnthropicProvider;
use crate::gemini::GeminiProvider;
use crate::openai::OpenAiProvider;
use crate::traits::CompletionProvider;

// ─────────────────────────────────────────────
// ProviderSpec — static metadata for one provider
// ─────────────────────────────────────────────

/// Static specification describing one LLM provider.
#[derive(Clone, Debug, PartialEq)]
pub struct ProviderSpec {
    pub kind: ProviderKind,
    /// Short name shown in the provider picker. E.g. `"ChatGPT"`.
    pub display_name: &'static str,
    /// Name printed in the report's "generated with" line. E.g. `"Google Gemini"`.
    pub report_name: &'static str,
    /// Where the user can obtain an API key.
    pub key_url: &'static str,
    /// Environment variable consulted for the credential.
    pub env_key: &'static str,
    pub default_api_base: &'static str,
    pub default_model: &'static str,
    /// `None` means the field is omitted from the request body.
    pub default_max_tokens: Option<u32>,
    /// `None` means the field is omitted from the request body.
    pub default_temperature: Option<f64>,
}

const CLAUDE: ProviderSpec = ProviderSpec {
    kind: ProviderKind::Claude,
    display_name: "Claude",
    report_name: "Claude AI",
    key_url: "https://console.anthropic.com/",
    env_key: "ANTHROPIC_API_KEY",
    default_api_base: "https://api.anthropic.com/v1",
    default_model: "claude-sonnet-4-20250514",
    default_max_tokens: Some(4000),
    default_temperature: None,
};

const GPT: ProviderSpec = ProviderSpec {
    kind: ProviderKind::Gpt,
    display_name: "ChatGPT",
    report_name: "ChatGPT",
    key_url: "https://platform.openai.com/api-keys",
    env_key: "OPENAI_API_KEY",
    default_api_base: "https://api.openai.com/v1",
    default_model: "gpt-4-turbo-preview",
    default_max_tokens: None,
    default_temperature: Some(0.7),
};

const GEMINI: ProviderSpec = ProviderSpec {
    kind: ProviderKind::Gemini,
    display_name: "Gemini",
    report_name: "Google Gemini",
    key_url: "https://makersuite.google.com/app/apikey",
    env_key: "GEMINI_API_KEY",
    default_api_base: "https://generativelanguage.googleapis.com/v1beta",
    default_model: "gemini-pro",
    default_max_tokens: Some(4096),
    default_temperature: Some(0.7),
};

/// All supported providers, in picker order.
pub static PROVIDERS: &[ProviderSpec] = &[CLAUDE, GPT, GEMINI];

/// Look up the spec for a provider.
pub fn spec(kind: ProviderKind) -> &'static ProviderSpec {
    match kind {
        ProviderKind::Claude => &CLAUDE,
        ProviderKind::Gpt => &GPT,
        ProviderKind::Gemini => &GEMINI,
    }
}

// ─────────────────────────────────────────────
// Resolved settings
// ─────────────────────────────────────────────

/// Endpoint and generation parameters after applying config overrides.
#[derive(Clone, Debug, PartialEq)]
pub struct ProviderSettings {
    pub api_base: String,
    pub model: String,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f64>,
}

impl ProviderSpec {
    /// Merge user overrides over this spec's defaults. Config wins.
    pub fn resolve(&self, config: &ProviderConfig) -> ProviderSettings {
        let api_base = config
            .api_base
            .clone()
            .unwrap_or_else(|| self.default_api_base.to_string());
        ProviderSettings {
            api_base: api_base.trim_end_matches('/').to_string(),
            model: config
                .model
                .clone()
                .unwrap_or_else(|| self.default_model.to_string()),
            max_tokens: config.max_tokens.or(self.default_max_tokens),
            temperature: config.temperature.or(self.default_temperature),
        }
    }

    /// Credential from this provider's environment variable, if set and non-empty.
    pub fn credential_from_env(&self) -> Option<String> {
        std::env::var(self.env_key).ok().filter(|k| !k.is_empty())
    }
}

// ─────────────────────────────────────────────
// Builder
// ─────────────────────────────────────────────

/// Build the adapter for `kind`, applying the user's overrides.
pub fn create_provider(kind: ProviderKind, config: &ProviderConfig) -> Box<dyn CompletionProvider> {
    let settings = spec(kind).resolve(config);
    match kind {
        ProviderKind::Claude => Box::new(AnthropicProvider::new(settings)),
        ProviderKind::Gpt => Box::new(OpenAiProvider::new(settings)),
        ProviderKind::Gemini => Box::new(GeminiProvider::new(settings)),
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
