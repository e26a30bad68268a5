//! Shared HTTP plumbing for live provider calls.

use std::time::Duration;

use serde_json::Value;

use crate::config::LiveConfig;
use crate::error::{ProviderError, SearchError};

/// Default User-Agent sent to providers (GitHub rejects requests without one).
pub fn default_user_agent() -> String {
    format!("deep-search/{}", env!("CARGO_PKG_VERSION"))
}

/// Build a [`reqwest::Client`] for provider calls.
///
/// The client has:
/// - Timeout from config
/// - Custom User-Agent if configured, otherwise [`default_user_agent`]
/// - A small redirect limit
///
/// # Errors
///
/// Returns [`SearchError::Config`] if the client cannot be constructed.
pub fn build_client(config: &LiveConfig) -> Result<reqwest::Client, SearchError> {
    let ua = match config.user_agent {
        Some(ref custom) => custom.clone(),
        None => default_user_agent(),
    };

    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(ua)
        .redirect(reqwest::redirect::Policy::limited(5))
        .build()
        .map_err(|e| SearchError::Config(format!("failed to build HTTP client: {e}")))
}

/// Send `request` and decode a JSON body, mapping every failure to [`ProviderError`].
pub async fn fetch_json(
    provider: &str,
    request: reqwest::RequestBuilder,
) -> Result<Value, ProviderError> {
    let response = request
        .send()
        .await
        .map_err(|e| ProviderError::Transport(format!("{provider} request failed: {e}")))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| ProviderError::Transport(format!("{provider} response read failed: {e}")))?;

    tracing::trace!(provider, status = status.as_u16(), bytes = body.len(), "provider response");

    if !status.is_success() {
        let message = error_message(&body)
            .or_else(|| status.canonical_reason().map(str::to_string))
            .unwrap_or_else(|| "request failed".to_string());
        return Err(ProviderError::Status { status: status.as_u16(), message });
    }

    serde_json::from_str(&body).map_err(|e| ProviderError::Parse(format!("{provider}: {e}")))
}

/// Pull a human-readable message out of an error body.
///
/// Understands `{"error": "..."}` (search proxy, Shodan),
/// `{"error": {"message": "..."}}` (Google) and `{"message": "..."}` (GitHub).
pub fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let message = match value.get("error") {
        Some(Value::String(message)) => Some(message.as_str()),
        Some(error) => error.get("message").and_then(Value::as_str),
        None => value.get("message").and_then(Value::as_str),
    };
    message.filter(|m| !m.trim().is_empty()).map(str::to_string)
}
