//! Config loader — reads `~/.arcascan/config.json` and merges env vars.
//!
//! # Loading precedence
//! 1. Defaults (from `Config::default()`)
//! 2. JSON file at `~/.arcascan/config.json`
//! 3. Environment variables `ARCASCAN_<SECTION>__<FIELD>` (override JSON)

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::schema::{Config, ProviderConfig};
use crate::types::ProviderKind;

/// Default config file path.
pub fn get_config_path() -> PathBuf {
    crate::utils::get_data_path().join("config.json")
}

/// Load configuration from the given path (or the default one) + env vars.
///
/// Falls back to `Config::default()` if the file doesn't exist or can't be parsed.
pub fn load_config(path: Option<&Path>) -> Config {
    let config_path = path.map(PathBuf::from).unwrap_or_else(get_config_path);
    apply_env_overrides(load_config_from_path(&config_path))
}

/// Load config from a specific file path, without env overrides.
fn load_config_from_path(path: &Path) -> Config {
    if !path.exists() {
        info!("No config file found at {}, using defaults", path.display());
        return Config::default();
    }

    debug!("Loading config from {}", path.display());

    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to read config file {}: {}", path.display(), e);
            return Config::default();
        }
    };

    match serde_json::from_str(&content) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to parse config {}: {}", path.display(), e);
            Config::default()
        }
    }
}

/// Save configuration to disk (pretty-printed JSON with camelCase keys).
pub fn save_config(config: &Config, path: Option<&Path>) -> std::io::Result<()> {
    let config_path = path.map(PathBuf::from).unwrap_or_else(get_config_path);

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(config).map_err(std::io::Error::other)?;

    std::fs::write(&config_path, json)?;
    debug!("Config saved to {}", config_path.display());
    Ok(())
}

/// Apply environment variable overrides on top of a loaded config.
///
/// Env var format: `ARCASCAN_<SECTION>__<FIELD>` (double underscore as delimiter).
///
/// Supported overrides:
/// - `ARCASCAN_DEFAULTS__PROVIDER` → `defaults.provider`
/// - `ARCASCAN_DEFAULTS__OUTPUT_DIR` → `defaults.output_dir`
/// - `ARCASCAN_PROVIDERS__<NAME>__API_BASE` → `providers.<name>.api_base`
/// - `ARCASCAN_PROVIDERS__<NAME>__MODEL` → `providers.<name>.model`
fn apply_env_overrides(mut config: Config) -> Config {
    if let Ok(val) = std::env::var("ARCASCAN_DEFAULTS__PROVIDER") {
        match val.parse::<ProviderKind>() {
            Ok(kind) => config.defaults.provider = kind,
            Err(e) => warn!("Ignoring ARCASCAN_DEFAULTS__PROVIDER: {}", e),
        }
    }
    if let Ok(val) = std::env::var("ARCASCAN_DEFAULTS__OUTPUT_DIR") {
        config.defaults.output_dir = val;
    }

    for kind in ProviderKind::ALL {
        let name = kind.as_str().to_uppercase();
        apply_provider_env(config.providers.get_mut(kind), &name);
    }

    config
}

/// Apply env var overrides for a single provider.
fn apply_provider_env(provider: &mut ProviderConfig, name: &str) {
    if let Ok(val) = std::env::var(format!("ARCASCAN_PROVIDERS__{name}__API_BASE")) {
        provider.api_base = Some(val);
    }
    if let Ok(val) = std::env::var(format!("ARCASCAN_PROVIDERS__{name}__MODEL")) {
        provider.model = Some(val);
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
