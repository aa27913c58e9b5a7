//! Validation errors raised before any request leaves the process.

use thiserror::Error;

use crate::types::IntakeField;

/// A guard on the intake step was not satisfied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Por favor, insira sua chave de API!")]
    MissingCredential,

    #[error("Preencha todos os campos obrigatórios! ({0} está vazio)")]
    MissingField(IntakeField),
}
