//! Shared CLI helpers — path expansion, credential lookup, status printing.

use std::path::PathBuf;

use anyhow::{bail, Result};
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use arcascan_core::config::Config;
use arcascan_core::types::ProviderKind;
use arcascan_providers::spec;

/// Expand `~` at the start of a path to the user's home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs_next::home_dir() {
            return home.join(rest);
        }
    }
    if path == "~" {
        if let Some(home) = dirs_next::home_dir() {
            return home;
        }
    }
    PathBuf::from(path)
}

/// Report directory: the flag if given, else the configured `outputDir`.
pub fn output_dir(flag: Option<PathBuf>, config: &Config) -> PathBuf {
    flag.unwrap_or_else(|| expand_tilde(&config.defaults.output_dir))
}

// ─────────────────────────────────────────────
// Credentials
// ─────────────────────────────────────────────

/// First non-blank candidate: flag, then environment.
pub fn pick_credential(flag: Option<String>, env: Option<String>) -> Option<String> {
    [flag, env]
        .into_iter()
        .flatten()
        .map(|k| k.trim().to_string())
        .find(|k| !k.is_empty())
}

/// Ask for the credential on the terminal. `None` if the user aborts.
///
/// The line is not added to history.
pub fn prompt_credential(editor: &mut DefaultEditor, kind: ProviderKind) -> Result<Option<String>> {
    let spec = spec(kind);
    println!(
        "{}",
        format!(
            "  Obtenha sua chave em {} (ou defina {} para não digitá-la).",
            spec.key_url, spec.env_key
        )
        .dimmed()
    );
    match editor.readline(&format!("  Chave de API {}: ", spec.display_name)) {
        Ok(line) => Ok(Some(line.trim().to_string())),
        Err(ReadlineError::Interrupted | ReadlineError::Eof) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Resolve a credential for one-shot use: flag, environment, then prompt.
pub fn resolve_credential(kind: ProviderKind, flag: Option<String>) -> Result<String> {
    if let Some(key) = pick_credential(flag, spec(kind).credential_from_env()) {
        return Ok(key);
    }
    let mut editor = DefaultEditor::new()?;
    match prompt_credential(&mut editor, kind)? {
        Some(key) if !key.is_empty() => Ok(key),
        _ => bail!("no API key provided for {}", spec(kind).display_name),
    }
}

// ─────────────────────────────────────────────
// Output
// ─────────────────────────────────────────────

/// Print the banner shown at wizard start.
pub fn print_banner() {
    let version = env!("CARGO_PKG_VERSION");
    println!();
    println!("{}  v{}", "🎯 ARCA SCAN".cyan().bold(), version.dimmed());
    println!(
        "{}",
        "Análise de tráfego pago com IA. Digite \"sair\" a qualquer momento.".dimmed()
    );
    println!();
}

/// Print a step heading, e.g. `[1/3] Informações do Cliente`.
pub fn print_step(number: u8, title: &str) {
    println!();
    println!("{} {}", format!("[{number}/3]").magenta().bold(), title.bold());
}

pub fn print_error(message: &str) {
    eprintln!("\n{} {}\n", "❌".red(), message.red());
}

pub fn print_saved(path: &std::path::Path) {
    println!("{} relatório salvo em {}", "✓".green(), path.display().to_string().bold());
}

/// Print a "thinking" placeholder while the request is in flight.
pub fn print_thinking(provider: &str) {
    eprint!("{}", format!("⠿ analisando com {provider}...").dimmed());
}

/// Clear the "thinking" placeholder.
pub fn clear_thinking() {
    eprint!("\r{}\r", " ".repeat(50));
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
