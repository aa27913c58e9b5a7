//! Interactive wizard — briefing, analysis, review.
//!
//! Uses `rustyline` for line editing. No history is kept: nothing typed here,
//! the API key included, is written to disk. Pressing Enter
//! on a field keeps its current value, so after a failed request the user
//! only retypes what they want to change.

use std::path::PathBuf;

use anyhow::Result;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::{Config as EditorConfig, DefaultEditor};

use arcascan_analysis::{analyze, write_report, Session, WizardError};
use arcascan_core::config::load_config;
use arcascan_core::types::{IntakeField, ProviderKind, Report};
use arcascan_core::utils::today_br;
use arcascan_core::ValidationError;
use arcascan_providers::{create_provider, spec};

use crate::helpers;

/// Exit commands (case-insensitive match).
const EXIT_COMMANDS: &[&str] = &["sair", "exit", "quit", "/exit", "/quit", ":q"];

/// One line of user input.
enum Input {
    Line(String),
    Exit,
}

/// Run the wizard until the user exits.
pub async fn run(provider: Option<ProviderKind>, output: Option<PathBuf>) -> Result<()> {
    let config = load_config(None);
    let out_dir = helpers::output_dir(output, &config);
    let mut session = Session::new(provider.unwrap_or(config.defaults.provider));

    helpers::print_banner();
    let mut editor = create_editor()?;

    'wizard: loop {
        // ── Step 1: briefing ──
        helpers::print_step(1, "Informações do Cliente");

        match choose_provider(&mut editor, session.provider())? {
            Input::Exit => break,
            Input::Line(choice) => {
                if let Ok(kind) = choice.parse::<ProviderKind>() {
                    if kind != session.provider() {
                        session.select_provider(kind)?;
                        session.set_credential("")?;
                    }
                }
            }
        }

        if !session.has_credential() {
            let kind = session.provider();
            let key = match spec(kind).credential_from_env() {
                Some(key) => Some(key),
                None => helpers::prompt_credential(&mut editor, kind)?,
            };
            match key {
                Some(key) => session.set_credential(key)?,
                None => break,
            }
        }

        for field in IntakeField::ALL {
            let prompt = field_prompt(field, session.intake().get(field));
            match read_line(&mut editor, &prompt)? {
                Input::Exit => break 'wizard,
                Input::Line(value) if !value.trim().is_empty() => {
                    session.set_field(field, value.trim())?;
                }
                Input::Line(_) => {}
            }
        }

        if let Err(e) = session.can_begin() {
            helpers::print_error(&e.to_string());
            continue;
        }

        // ── Step 2: request ──
        helpers::print_step(2, "Análise");
        let provider = create_provider(session.provider(), config.providers.get(session.provider()));
        helpers::print_thinking(provider.display_name());
        let outcome = analyze(&mut session, provider.as_ref())
            .await
            .map(summarize);
        helpers::clear_thinking();

        match outcome {
            Ok(summary) => println!("{summary}"),
            Err(WizardError::Failed(message)) => {
                helpers::print_error(&message);
                continue;
            }
            Err(WizardError::Validation(ValidationError::MissingCredential)) => {
                helpers::print_error(&ValidationError::MissingCredential.to_string());
                continue;
            }
            Err(e) => return Err(e.into()),
        }

        // ── Step 3: review ──
        helpers::print_step(3, "Relatório");
        if let Some(html) = session.render(&today_br()) {
            match write_report(&html, &session.intake().client_name, &out_dir) {
                Ok(path) => helpers::print_saved(&path),
                Err(e) => helpers::print_error(&format!("falha ao salvar o relatório: {e}")),
            }
        }

        match read_line(&mut editor, "Nova análise? [s/N]: ")? {
            Input::Line(answer) if wants_new_analysis(&answer) => {
                session.reset()?;
            }
            _ => break,
        }
    }

    println!("\nAté logo! 👋");
    Ok(())
}

/// Ask for the provider, showing the current one as the default.
fn choose_provider(editor: &mut DefaultEditor, current: ProviderKind) -> Result<Input> {
    let options: Vec<&str> = ProviderKind::ALL.iter().map(|k| k.as_str()).collect();
    let input = read_line(
        editor,
        &format!("Provedor de IA ({}) [{}]: ", options.join("/"), current),
    )?;
    if let Input::Line(choice) = &input {
        let choice = choice.trim();
        if !choice.is_empty() && choice.parse::<ProviderKind>().is_err() {
            helpers::print_error(&format!("provedor desconhecido: {choice}; mantendo {current}"));
        }
    }
    Ok(input)
}

fn field_prompt(field: IntakeField, current: &str) -> String {
    let marker = if field.is_required() { "*" } else { "" };
    if current.is_empty() {
        format!("{}{marker}: ", field.label())
    } else {
        format!("{}{marker} [{current}]: ", field.label())
    }
}

/// Short overview printed once the report is ready.
fn summarize(report: &Report) -> String {
    format!(
        "{} {} oportunidades · {} concorrentes · {} públicos · {} KPIs · {} próximos passos",
        "✓".green(),
        report.market_analysis.opportunities.len(),
        report.competitors.len(),
        report.segmentation.target_audiences.len(),
        report.success_metrics.kpis.len(),
        report.next_steps.len(),
    )
}

fn wants_new_analysis(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "s" | "sim" | "y" | "yes")
}

/// Read one line. Ctrl-C, Ctrl-D and exit commands end the wizard.
fn read_line(editor: &mut DefaultEditor, prompt: &str) -> Result<Input> {
    match editor.readline(prompt) {
        Ok(line) => {
            if is_exit_command(line.trim()) {
                return Ok(Input::Exit);
            }
            Ok(Input::Line(line))
        }
        Err(ReadlineError::Interrupted | ReadlineError::Eof) => Ok(Input::Exit),
        Err(e) => Err(e.into()),
    }
}

/// Editor settings: history disabled.
fn editor_config() -> Result<EditorConfig> {
    Ok(EditorConfig::builder()
        .auto_add_history(false)
        .max_history_size(0)?
        .build())
}

fn create_editor() -> Result<DefaultEditor> {
    Ok(DefaultEditor::with_config(editor_config()?)?)
}

/// Check if input is an exit command.
fn is_exit_command(input: &str) -> bool {
    let lower = input.to_lowercase();
    EXIT_COMMANDS.contains(&lower.as_str())
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
