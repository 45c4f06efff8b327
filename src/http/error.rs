//! Relay failure type.
//!
//! Every variant is rendered to the browser the same way: a 502 with the
//! structured connectivity body (see `response.rs`).

use std::time::Duration;

use thiserror::Error;

/// A failure anywhere between reading the inbound request and reading the
/// backend's response body.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("failed to read request body: {0}")]
    Body(#[source] axum::Error),

    #[error("invalid destination '{url}': {source}")]
    InvalidDestination {
        url: String,
        #[source]
        source: axum::http::Error,
    },

    #[error("backend request failed: {0}")]
    Upstream(#[from] hyper_util::client::legacy::Error),

    #[error("backend did not respond within {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("failed to read backend response: {0}")]
    ResponseBody(#[source] hyper::Error),
}

impl RelayError {
    /// Short label used for the `reason` field in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            RelayError::Body(_) => "request_body",
            RelayError::InvalidDestination { .. } => "destination",
            RelayError::Upstream(_) => "upstream",
            RelayError::Timeout(_) => "timeout",
            RelayError::ResponseBody(_) => "response_body",
        }
    }
}
