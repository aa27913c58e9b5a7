//! `arcascan onboard` — create `~/.arcascan/config.json` with defaults.

use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;

use arcascan_core::config::{get_config_path, save_config, Config};
use arcascan_providers::PROVIDERS;

/// Write a default config at `path` unless one exists. Returns whether it was created.
fn write_default_config(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    save_config(&Config::default(), Some(path))
        .with_context(|| format!("failed to write config to {}", path.display()))?;
    Ok(true)
}

/// Run the onboard command.
pub fn run() -> Result<()> {
    println!();
    println!("{}", "🎯 ARCA SCAN — Setup".cyan().bold());
    println!();

    let config_path = get_config_path();
    if write_default_config(&config_path)? {
        println!("  {} created config at {}", "✓".green(), config_path.display());
    } else {
        println!(
            "  {} config already exists at {}",
            "✓".green(),
            config_path.display()
        );
    }

    println!();
    println!("  API keys are never saved. Export one of these to skip the prompt:");
    for spec in PROVIDERS {
        println!(
            "    {:<18} {}",
            spec.env_key,
            format!("{} · {}", spec.display_name, spec.key_url).dimmed()
        );
    }

    println!();
    println!(
        "{}",
        "  Setup complete! Run `arcascan wizard` to start an analysis.".green()
    );
    println!();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use arcascan_core::config::load_config;

    #[test]
    fn creates_config_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        assert!(write_default_config(&path).unwrap());
        assert!(path.exists());
        assert_eq!(load_config(Some(&path)).defaults.output_dir, ".");

        assert!(!write_default_config(&path).unwrap());
    }

    #[test]
    fn keeps_existing_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"defaults": {"provider": "gemini"}}"#).unwrap();

        assert!(!write_default_config(&path).unwrap());
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("gemini"));
        assert!(!content.contains("outputDir"));
    }

    #[test]
    fn default_config_has_no_credential_field() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        write_default_config(&path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap().to_lowercase();
        assert!(!content.contains("key"));
    }
}
