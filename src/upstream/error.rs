//! Upstream error taxonomy.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors raised while talking to the upstream employee API.
///
/// These stay inside the upstream client; its public operations fold them
/// into neutral results.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Connection, timeout or body read failure.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Upstream answered with a non-success status.
    #[error("upstream returned status {0}")]
    Status(StatusCode),

    /// Upstream answered 2xx with a body that is not a valid envelope.
    #[error("invalid upstream payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid upstream URL: {0}")]
    InvalidUrl(String),

    #[error("failed to build HTTP client: {0}")]
    Build(reqwest::Error),
}

impl UpstreamError {
    /// Whether the same call may succeed if repeated.
    ///
    /// Transport failures, 5xx and 429 are transient. Other statuses and bad
    /// payloads would fail the same way again.
    pub fn is_retryable(&self) -> bool {
        match self {
            UpstreamError::Transport(_) => true,
            UpstreamError::Status(status) => {
                status.is_server_error() || *status == StatusCode::TOO_MANY_REQUESTS
            }
            UpstreamError::Decode(_) | UpstreamError::InvalidUrl(_) | UpstreamError::Build(_) => {
                false
            }
        }
    }
}
