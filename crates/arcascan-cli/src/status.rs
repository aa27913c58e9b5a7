//! `arcascan status` — show configuration and credential status.
//!
//! Credentials are reported as set or unset only; values are never printed.

use anyhow::Result;
use colored::Colorize;

use arcascan_core::config::{get_config_path, load_config};
use arcascan_providers::PROVIDERS;

use crate::helpers;

/// Run the status command.
pub fn run() -> Result<()> {
    let config = load_config(None);
    let config_path = get_config_path();

    println!();
    println!("{}", "🎯 ARCA SCAN Status".cyan().bold());
    println!();

    println!(
        "  {:<18} {} {}",
        "Config:".bold(),
        config_path.display(),
        if config_path.exists() {
            "✓".green().to_string()
        } else {
            "(not found, run `arcascan onboard`)".red().to_string()
        }
    );
    println!(
        "  {:<18} {}",
        "Default provider:".bold(),
        config.defaults.provider
    );
    println!(
        "  {:<18} {}",
        "Output dir:".bold(),
        helpers::output_dir(None, &config).display()
    );

    println!();
    println!("  {}", "Credentials:".bold());
    for spec in PROVIDERS {
        let status = if spec.credential_from_env().is_some() {
            format!("{} ({} set)", "✓".green(), spec.env_key)
        } else {
            format!("{}", format!("· {} not set, will prompt", spec.env_key).dimmed())
        };
        println!("    {:<20} {}", spec.display_name, status);
    }
    println!();

    Ok(())
}
