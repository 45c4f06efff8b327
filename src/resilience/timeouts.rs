//! Timeout enforcement.
//!
//! # Responsibilities
//! - Put one deadline around the whole backend exchange
//! - Cancel the exchange cleanly when the deadline passes
//!
//! # Design Decisions
//! - Uses Tokio's timeout facilities
//! - The deadline covers connect, send and reading the response body, so a
//!   backend that stalls mid-body cannot hold the request open
//! - Timeout errors are distinct from other errors but render the same 502

use std::future::Future;
use std::time::Duration;

use crate::http::error::RelayError;

/// Run `exchange` under `limit`, mapping expiry to [`RelayError::Timeout`].
pub async fn within<F, T>(limit: Duration, exchange: F) -> Result<T, RelayError>
where
    F: Future<Output = Result<T, RelayError>>,
{
    match tokio::time::timeout(limit, exchange).await {
        Ok(result) => result,
        Err(_) => Err(RelayError::Timeout(limit)),
    }
}
