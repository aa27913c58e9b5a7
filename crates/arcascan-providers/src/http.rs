//! Shared request plumbing for the vendor adapters.
//!
//! Every adapter sends one JSON POST and maps the outcome onto `ProviderError`
//! the same way: transport failures, non-2xx statuses and undecodable bodies.

use serde::de::DeserializeOwned;
use tracing::{debug, error};

use crate::traits::ProviderError;

/// Build the HTTP client used by an adapter.
///
/// No request timeout is configured; the transport's own defaults apply.
pub(crate) fn build_client() -> reqwest::Client {
    reqwest::Client::new()
}

/// Send a prepared request and decode a 2xx JSON body into `T`.
pub(crate) async fn send_json<T: DeserializeOwned>(
    request: reqwest::RequestBuilder,
    provider: &'static str,
) -> Result<T, ProviderError> {
    // Gemini sends the credential in the query string; keep URLs out of errors.
    let response = request.send().await.map_err(|source| {
        let source = source.without_url();
        error!(provider, error = %source, "HTTP request failed");
        ProviderError::Request { provider, source }
    })?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let body = if body.trim().is_empty() {
            status.canonical_reason().unwrap_or("unknown status").to_string()
        } else {
            body
        };
        error!(provider, status = %status, body = %body, "API error");
        return Err(ProviderError::Status {
            provider,
            status,
            body,
        });
    }

    let text = response
        .text()
        .await
        .map_err(|source| ProviderError::Request {
            provider,
            source: source.without_url(),
        })?;
    debug!(provider, bytes = text.len(), "response body received");

    serde_json::from_str(&text).map_err(|e| {
        error!(provider, error = %e, "Failed to decode response body");
        ProviderError::UnexpectedResponse {
            provider,
            detail: e.to_string(),
        }
    })
}
