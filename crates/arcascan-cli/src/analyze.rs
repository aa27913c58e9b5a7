//! `arcascan analyze` — one-shot analysis.
//!
//! The intake comes from an optional JSON file (camelCase keys, as in the
//! config) with individual flags layered on top.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;
use colored::Colorize;
use tracing::info;

use arcascan_analysis::{analyze, build_prompt, write_report, Session, WizardError};
use arcascan_core::config::load_config;
use arcascan_core::types::{Intake, IntakeField, ProviderKind};
use arcascan_core::utils::today_br;
use arcascan_core::ValidationError;
use arcascan_providers::{create_provider, spec};

use crate::helpers;

#[derive(Args, Debug, Default)]
pub struct AnalyzeArgs {
    /// Provider (claude, gpt, gemini); defaults to the configured one
    #[arg(short, long)]
    pub provider: Option<ProviderKind>,

    /// API key; falls back to the provider's environment variable, then a prompt
    #[arg(long)]
    pub api_key: Option<String>,

    /// JSON file with the intake fields
    #[arg(short, long)]
    pub intake: Option<PathBuf>,

    /// Client name
    #[arg(long)]
    pub client: Option<String>,

    /// Client niche
    #[arg(long)]
    pub niche: Option<String>,

    /// Main campaign goal
    #[arg(long)]
    pub goal: Option<String>,

    /// Monthly budget
    #[arg(long)]
    pub budget: Option<String>,

    /// Known competitors
    #[arg(long)]
    pub competitors: Option<String>,

    /// Current challenges
    #[arg(long)]
    pub challenges: Option<String>,

    /// Directory for the exported report
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print the prompt and exit without calling the provider
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,

    /// Enable debug logging
    #[arg(long, default_value_t = false)]
    pub logs: bool,
}

impl AnalyzeArgs {
    fn field_overrides(&self) -> [(IntakeField, Option<&String>); 6] {
        [
            (IntakeField::ClientName, self.client.as_ref()),
            (IntakeField::Niche, self.niche.as_ref()),
            (IntakeField::MainGoal, self.goal.as_ref()),
            (IntakeField::Budget, self.budget.as_ref()),
            (IntakeField::Competitors, self.competitors.as_ref()),
            (IntakeField::CurrentChallenges, self.challenges.as_ref()),
        ]
    }
}

/// Read an intake JSON file.
fn load_intake_file(path: &Path) -> Result<Intake> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read intake file {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("invalid intake file {}", path.display()))
}

/// Intake from the file (if any) with flags applied over it.
fn build_intake(args: &AnalyzeArgs) -> Result<Intake> {
    let mut intake = match &args.intake {
        Some(path) => load_intake_file(path)?,
        None => Intake::default(),
    };
    for (field, value) in args.field_overrides() {
        if let Some(value) = value {
            intake.set(field, value.as_str());
        }
    }
    Ok(intake)
}

/// Run the analyze command.
pub async fn run(args: AnalyzeArgs) -> Result<()> {
    let config = load_config(None);
    let kind = args.provider.unwrap_or(config.defaults.provider);

    let mut session = Session::new(kind);
    session.set_intake(build_intake(&args)?)?;

    if args.dry_run {
        println!("{}", build_prompt(session.intake()));
        return Ok(());
    }

    if let Some(field) = session.intake().missing_required() {
        return Err(ValidationError::MissingField(field).into());
    }
    session.set_credential(helpers::resolve_credential(kind, args.api_key.clone())?)?;
    session.can_begin()?;

    let provider = create_provider(kind, config.providers.get(kind));
    info!(provider = %kind, model = provider.model(), "starting one-shot analysis");

    helpers::print_thinking(spec(kind).display_name);
    let outcome = analyze(&mut session, provider.as_ref()).await.map(|_| ());
    helpers::clear_thinking();

    match outcome {
        Ok(()) => {}
        Err(WizardError::Failed(message)) => {
            helpers::print_error(&message);
            bail!("analysis failed");
        }
        Err(e) => return Err(e.into()),
    }

    let html = session
        .render(&today_br())
        .context("analysis finished without a report")?;
    let dir = helpers::output_dir(args.output, &config);
    let path = write_report(&html, &session.intake().client_name, &dir)
        .with_context(|| format!("failed to write report to {}", dir.display()))?;

    helpers::print_saved(&path);
    println!("{}", format!("  Gerado com {}", spec(kind).report_name).dimmed());
    Ok(())
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_intake_from_flags_only() {
        let args = AnalyzeArgs {
            client: Some("Loja X".into()),
            niche: Some("moda".into()),
            challenges: Some("CPA alto".into()),
            ..Default::default()
        };
        let intake = build_intake(&args).unwrap();
        assert_eq!(intake.client_name, "Loja X");
        assert_eq!(intake.niche, "moda");
        assert_eq!(intake.current_challenges, "CPA alto");
        assert!(intake.budget.is_empty());
    }

    #[test]
    fn build_intake_flags_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("intake.json");
        std::fs::write(
            &path,
            r#"{"clientName": "Loja X", "niche": "moda", "budget": "R$1000", "competitors": "A, B"}"#,
        )
        .unwrap();

        let args = AnalyzeArgs {
            intake: Some(path),
            budget: Some("R$2000".into()),
            ..Default::default()
        };
        let intake = build_intake(&args).unwrap();
        assert_eq!(intake.client_name, "Loja X");
        assert_eq!(intake.budget, "R$2000");
        assert_eq!(intake.competitors, "A, B");
        assert!(intake.main_goal.is_empty());
    }

    #[test]
    fn build_intake_missing_file() {
        let args = AnalyzeArgs {
            intake: Some(PathBuf::from("/nonexistent/intake.json")),
            ..Default::default()
        };
        let err = build_intake(&args).unwrap_err();
        assert!(err.to_string().contains("failed to read intake file"));
    }

    #[test]
    fn build_intake_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("intake.json");
        std::fs::write(&path, "not json").unwrap();

        let args = AnalyzeArgs {
            intake: Some(path),
            ..Default::default()
        };
        assert!(build_intake(&args)
            .unwrap_err()
            .to_string()
            .contains("invalid intake file"));
    }

    #[tokio::test]
    async fn dry_run_needs_no_credential() {
        let args = AnalyzeArgs {
            client: Some("Loja X".into()),
            dry_run: true,
            ..Default::default()
        };
        assert!(run(args).await.is_ok());
    }

    #[tokio::test]
    async fn missing_niche_fails_before_credential() {
        // No api key and no env var: reaching the credential step would prompt.
        let args = AnalyzeArgs {
            provider: Some(ProviderKind::Claude),
            client: Some("Loja X".into()),
            ..Default::default()
        };
        let err = run(args).await.unwrap_err();
        assert_eq!(
            err.downcast_ref::<ValidationError>(),
            Some(&ValidationError::MissingField(IntakeField::Niche))
        );
    }
}
