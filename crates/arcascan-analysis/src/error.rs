//! Error types for the analysis pipeline and the wizard session.

use thiserror::Error;

use arcascan_core::ValidationError;
use arcascan_providers::ProviderError;

use crate::session::WizardStep;

/// Message shown for any transport or parse failure. The two are not distinguished
/// for the user: a bad key and malformed model output look the same from here.
pub const GENERIC_FAILURE_MESSAGE: &str =
    "Erro ao gerar a análise.\n\nVerifique sua chave de API.";

/// The parsed completion does not match the report shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("report field `{path}`: expected {expected}, found {found}")]
pub struct SchemaError {
    /// Dotted/indexed location, e.g. `analise_concorrentes[1].pontos_fortes`.
    pub path: String,
    pub expected: &'static str,
    pub found: String,
}

/// Failure turning completion text into a `Report`.
#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("completion is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// Anything that can go wrong between sending the prompt and holding a report.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Transport(#[from] ProviderError),

    #[error(transparent)]
    Normalize(#[from] NormalizeError),
}

impl AnalysisError {
    pub fn is_schema(&self) -> bool {
        matches!(self, AnalysisError::Normalize(NormalizeError::Schema(_)))
    }

    /// Text to show the user. Transport and parse failures collapse into
    /// [`GENERIC_FAILURE_MESSAGE`]; schema failures name the offending field.
    pub fn user_message(&self) -> String {
        match self {
            AnalysisError::Normalize(NormalizeError::Schema(e)) => format!(
                "A resposta da IA veio incompleta: campo `{}` ausente ou inválido.\n\nTente novamente.",
                e.path
            ),
            _ => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }
}

/// A wizard transition was refused or the request failed.
#[derive(Debug, Error)]
pub enum WizardError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("action not allowed in the {0} step")]
    NotReady(WizardStep),

    /// The request ran and failed; carries the user-facing message.
    #[error("{0}")]
    Failed(String),
}
