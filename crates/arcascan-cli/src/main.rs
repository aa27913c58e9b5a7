//! ARCA SCAN CLI — entry point.
//!
//! # Commands
//!
//! - `arcascan analyze [...]` — one-shot analysis from flags and/or an intake file
//! - `arcascan wizard` — interactive three-step wizard
//! - `arcascan providers` — list supported providers
//! - `arcascan status` — show configuration and credential status
//! - `arcascan onboard` — write a default config file

mod analyze;
mod helpers;
mod onboard;
mod providers;
mod status;
mod wizard;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use arcascan_core::types::ProviderKind;

// ─────────────────────────────────────────────
// CLI definition
// ─────────────────────────────────────────────

/// 🎯 ARCA SCAN — paid-traffic market analysis from a client briefing
#[derive(Parser)]
#[command(name = "arcascan", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one analysis non-interactively and export the HTML report
    Analyze(analyze::AnalyzeArgs),

    /// Fill in the briefing step by step and review the report
    Wizard {
        /// Provider to start with (claude, gpt, gemini)
        #[arg(short, long)]
        provider: Option<ProviderKind>,

        /// Directory for exported reports (defaults to config `outputDir`)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Enable debug logging
        #[arg(long, default_value_t = false)]
        logs: bool,
    },

    /// List supported providers
    Providers,

    /// Show configuration and credential status
    Status,

    /// Create the default configuration file
    Onboard,
}

// ─────────────────────────────────────────────
// Entrypoint
// ─────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze(args) => {
            init_logging(args.logs);
            analyze::run(args).await
        }
        Commands::Wizard {
            provider,
            output,
            logs,
        } => {
            init_logging(logs);
            wizard::run(provider, output).await
        }
        Commands::Providers => providers::run(),
        Commands::Status => status::run(),
        Commands::Onboard => onboard::run(),
    }
}

/// Initialize tracing/logging.
fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("arcascan=debug,info")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
