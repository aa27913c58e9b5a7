//! Completion provider trait — the one capability every vendor integration offers.

use async_trait::async_trait;
use thiserror::Error;

use arcascan_core::types::ProviderKind;

use crate::registry::spec;

/// Failure while talking to a provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Network or transport failure before a response was received.
    #[error("error calling {provider}: {source}")]
    Request {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// The provider answered with a non-2xx status.
    #[error("{provider} returned {status}: {body}")]
    Status {
        provider: &'static str,
        status: reqwest::StatusCode,
        body: String,
    },

    /// The body was not JSON or lacked the expected completion fields.
    #[error("unexpected response from {provider}: {detail}")]
    UnexpectedResponse {
        provider: &'static str,
        detail: String,
    },
}

impl ProviderError {
    /// HTTP status, when the provider answered at all.
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            ProviderError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Trait implemented by each LLM vendor adapter.
///
/// One call to [`submit`](CompletionProvider::submit) performs exactly one outbound
/// request. The credential is passed per call and sent exactly as supplied.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Send `prompt` and return the provider's raw completion text.
    async fn submit(&self, prompt: &str, credential: &str) -> Result<String, ProviderError>;

    /// Which provider this adapter talks to.
    fn kind(&self) -> ProviderKind;

    /// Model identifier sent with each request.
    fn model(&self) -> &str;

    /// Display name for logging and UI.
    fn display_name(&self) -> &str {
        spec(self.kind()).display_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_accessor() {
        let err = ProviderError::Status {
            provider: "Claude",
            status: reqwest::StatusCode::UNAUTHORIZED,
            body: "invalid x-api-key".into(),
        };
        assert_eq!(err.status(), Some(reqwest::StatusCode::UNAUTHORIZED));
        assert!(err.to_string().contains("401"));
        assert!(err.to_string().contains("invalid x-api-key"));

        let err = ProviderError::UnexpectedResponse {
            provider: "Gemini",
            detail: "no candidates".into(),
        };
        assert_eq!(err.status(), None);
    }
}
