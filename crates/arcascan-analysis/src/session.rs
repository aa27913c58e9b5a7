//! Wizard session — the three-step flow around a single analysis.
//!
//! ```text
//!   Intake ──begin_request──▶ Requesting ──complete(Ok)──▶ Reviewing
//!     ▲                           │                            │
//!     └──────complete(Err)────────┘                            │
//!     └──────────────────────────reset─────────────────────────┘
//! ```
//!
//! Intake edits are only accepted in `Intake`. `begin_request` refuses to run
//! unless the session is in `Intake`, so at most one request is in flight.

use std::fmt;

use tracing::{debug, error, info};

use arcascan_core::types::{Intake, IntakeField, ProviderKind, Report};
use arcascan_core::ValidationError;
use arcascan_providers::CompletionProvider;

use crate::error::{AnalysisError, WizardError};
use crate::normalize::normalize_completion;
use crate::prompt::build_prompt;
use crate::render::render_report;

/// Where the wizard currently is.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WizardStep {
    #[default]
    Intake,
    Requesting,
    Reviewing,
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            WizardStep::Intake => "intake",
            WizardStep::Requesting => "requesting",
            WizardStep::Reviewing => "reviewing",
        })
    }
}

/// State for one user working through the wizard.
///
/// The credential lives only here, in memory.
#[derive(Default)]
pub struct Session {
    step: WizardStep,
    provider: ProviderKind,
    credential: String,
    intake: Intake,
    report: Option<Report>,
    last_error: Option<String>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("step", &self.step)
            .field("provider", &self.provider)
            .field("credential", &if self.has_credential() { "<redacted>" } else { "<empty>" })
            .field("intake", &self.intake)
            .field("has_report", &self.report.is_some())
            .field("last_error", &self.last_error)
            .finish()
    }
}

impl Session {
    pub fn new(provider: ProviderKind) -> Self {
        Self {
            provider,
            ..Default::default()
        }
    }

    // ── Accessors ──

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn provider(&self) -> ProviderKind {
        self.provider
    }

    pub fn intake(&self) -> &Intake {
        &self.intake
    }

    /// The report, once the session reaches `Reviewing`.
    pub fn report(&self) -> Option<&Report> {
        self.report.as_ref()
    }

    /// User-facing message from the last failed request, cleared on the next attempt.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn has_credential(&self) -> bool {
        !self.credential.trim().is_empty()
    }

    // ── Intake edits ──

    fn ensure_step(&self, expected: WizardStep) -> Result<(), WizardError> {
        if self.step == expected {
            Ok(())
        } else {
            Err(WizardError::NotReady(self.step))
        }
    }

    pub fn set_field(&mut self, field: IntakeField, value: impl Into<String>) -> Result<(), WizardError> {
        self.ensure_step(WizardStep::Intake)?;
        self.intake.set(field, value);
        Ok(())
    }

    pub fn set_intake(&mut self, intake: Intake) -> Result<(), WizardError> {
        self.ensure_step(WizardStep::Intake)?;
        self.intake = intake;
        Ok(())
    }

    pub fn select_provider(&mut self, provider: ProviderKind) -> Result<(), WizardError> {
        self.ensure_step(WizardStep::Intake)?;
        self.provider = provider;
        Ok(())
    }

    pub fn set_credential(&mut self, credential: impl Into<String>) -> Result<(), WizardError> {
        self.ensure_step(WizardStep::Intake)?;
        self.credential = credential.into();
        Ok(())
    }

    // ── Transitions ──

    /// Check the `Intake → Requesting` guard without changing state.
    ///
    /// The credential is checked first, then the required fields in form order.
    pub fn can_begin(&self) -> Result<(), ValidationError> {
        if !self.has_credential() {
            return Err(ValidationError::MissingCredential);
        }
        match self.intake.missing_required() {
            Some(field) => Err(ValidationError::MissingField(field)),
            None => Ok(()),
        }
    }

    /// `Intake → Requesting`. Returns the prompt to send.
    pub fn begin_request(&mut self) -> Result<String, WizardError> {
        self.ensure_step(WizardStep::Intake)?;
        self.can_begin()?;
        self.step = WizardStep::Requesting;
        self.last_error = None;
        debug!(provider = %self.provider, client = %self.intake.client_name, "request started");
        Ok(build_prompt(&self.intake))
    }

    /// `Requesting → Reviewing` on success, `Requesting → Intake` on failure.
    ///
    /// On failure the intake and credential are kept and the user-facing
    /// message is returned in [`WizardError::Failed`].
    pub fn complete(&mut self, outcome: Result<Report, AnalysisError>) -> Result<&Report, WizardError> {
        self.ensure_step(WizardStep::Requesting)?;
        match outcome {
            Ok(report) => {
                self.step = WizardStep::Reviewing;
                info!(
                    provider = %self.provider,
                    competitors = report.competitors.len(),
                    "analysis ready"
                );
                let report: &Report = self.report.insert(report);
                Ok(report)
            }
            Err(e) => {
                error!(provider = %self.provider, error = %e, schema = e.is_schema(), "analysis failed");
                self.step = WizardStep::Intake;
                let message = e.user_message();
                self.last_error = Some(message.clone());
                Err(WizardError::Failed(message))
            }
        }
    }

    /// `Reviewing → Intake`: discard the report and clear every intake field.
    ///
    /// Provider selection and credential survive. Also accepted in `Intake`
    /// (clears the form); refused while a request is in flight.
    pub fn reset(&mut self) -> Result<(), WizardError> {
        if self.step == WizardStep::Requesting {
            return Err(WizardError::NotReady(self.step));
        }
        self.step = WizardStep::Intake;
        self.intake = Intake::default();
        self.report = None;
        self.last_error = None;
        Ok(())
    }

    /// Render the current report, if any.
    pub fn render(&self, generated_on: &str) -> Option<String> {
        self.report
            .as_ref()
            .map(|report| render_report(report, &self.intake, self.provider, generated_on))
    }
}

/// Drive one full request: validate, prompt, submit, normalise, complete.
///
/// The exclusive borrow on `session` spans the whole call.
pub async fn analyze<'s>(
    session: &'s mut Session,
    provider: &dyn CompletionProvider,
) -> Result<&'s Report, WizardError> {
    let prompt = session.begin_request()?;
    info!(
        provider = provider.display_name(),
        model = provider.model(),
        prompt_chars = prompt.len(),
        "requesting analysis"
    );

    let outcome = match provider.submit(&prompt, &session.credential).await {
        Ok(text) => normalize_completion(&text).map_err(AnalysisError::from),
        Err(e) => Err(AnalysisError::from(e)),
    };
    session.complete(outcome)
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
