//! Configuration schema.
//!
//! Hierarchy: `Config` → `Defaults`, `ProvidersConfig` → `ProviderConfig`.
//!
//! JSON on disk uses **camelCase** keys; Rust uses snake_case.
//! No credential field: API keys are only held in memory.

use serde::{Deserialize, Serialize};

use crate::types::ProviderKind;

// ─────────────────────────────────────────────
// Root Config
// ─────────────────────────────────────────────

/// Root configuration — loaded from `~/.arcascan/config.json` + env vars.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub defaults: Defaults,
    pub providers: ProvidersConfig,
}

/// Session defaults applied when the CLI doesn't override them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Defaults {
    /// Provider selected at session start.
    pub provider: ProviderKind,
    /// Directory exported reports are written to.
    pub output_dir: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            provider: ProviderKind::Claude,
            output_dir: ".".to_string(),
        }
    }
}

// ─────────────────────────────────────────────
// Providers
// ─────────────────────────────────────────────

/// Per-provider overrides. Unset values fall back to the provider's built-in defaults.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProviderConfig {
    /// Custom API base URL (e.g. a proxy or a mock server).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
    /// Model identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Maximum output tokens.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Sampling temperature.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
}

/// One `ProviderConfig` per supported provider.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProvidersConfig {
    pub claude: ProviderConfig,
    pub gpt: ProviderConfig,
    pub gemini: ProviderConfig,
}

impl ProvidersConfig {
    pub fn get(&self, kind: ProviderKind) -> &ProviderConfig {
        match kind {
            ProviderKind::Claude => &self.claude,
            ProviderKind::Gpt => &self.gpt,
            ProviderKind::Gemini => &self.gemini,
        }
    }

    pub fn get_mut(&mut self, kind: ProviderKind) -> &mut ProviderConfig {
        match kind {
            ProviderKind::Claude => &mut self.claude,
            ProviderKind::Gpt => &mut self.gpt,
            ProviderKind::Gemini => &mut self.gemini,
        }
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
