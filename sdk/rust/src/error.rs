//! Client-side error type.

use serde_json::Value;
use thiserror::Error;

/// Normalized failure surfaced to callers of the API client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The backend answered with a non-success status.
    ///
    /// `detail` holds the backend's own `detail` field when the error body
    /// was JSON and carried one.
    #[error("{message}")]
    Backend {
        status: u16,
        message: String,
        detail: Option<Value>,
    },

    /// DNS, connect, timeout or any other transport failure.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response claimed to be JSON but did not parse.
    #[error("invalid JSON in response body: {0}")]
    Decode(#[source] serde_json::Error),

    /// The request payload could not be serialized.
    #[error("failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),
}

impl ClientError {
    /// Build the error for a JSON error body.
    pub(crate) fn from_json_body(status: u16, body: &Value) -> Self {
        let detail = body.get("detail").filter(|d| !d.is_null()).cloned();
        let message = match &detail {
            Some(Value::String(text)) if !text.is_empty() => text.clone(),
            Some(Value::String(_)) | None => format!("API Error: {status}"),
            Some(other) => other.to_string(),
        };
        ClientError::Backend {
            status,
            message,
            detail,
        }
    }

    /// HTTP status of a backend-reported failure.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Backend { status, .. } => Some(*status),
            ClientError::Transport(e) => e.status().map(|s| s.as_u16()),
            ClientError::Decode(_) | ClientError::Encode(_) => None,
        }
    }

    /// Backend-provided `detail` field, if any.
    pub fn detail(&self) -> Option<&Value> {
        match self {
            ClientError::Backend { detail, .. } => detail.as_ref(),
            _ => None,
        }
    }

    /// True for failures that never reached a backend response.
    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::Transport(_))
    }
}
