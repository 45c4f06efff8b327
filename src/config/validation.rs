//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, body limit > 0)
//! - Check the backend origin and path prefixes are well-formed
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RelayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::RelayConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address '{0}' is not a socket address")]
    BindAddress(String),

    #[error(
        "relay.mount_prefix '{0}' must start with '/', must not end with '/' and must not contain '{{', '}}' or '*'"
    )]
    MountPrefix(String),

    #[error("relay.api_prefix '{0}' must start with '/'")]
    ApiPrefix(String),

    #[error("relay.backend_origin '{origin}' is invalid: {reason}")]
    BackendOrigin { origin: String, reason: String },

    #[error("relay.timeout_secs must be greater than zero")]
    ZeroTimeout,

    #[error("relay.max_body_size must be greater than zero")]
    ZeroBodyLimit,

    #[error("observability.metrics_address '{0}' is not a socket address")]
    MetricsAddress(String),
}

/// Validate a loaded configuration.
pub fn validate_config(config: &RelayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.listener.bind_address.clone()));
    }

    let relay = &config.relay;
    let mount = relay.mount_prefix.as_str();
    // Route syntax in the prefix would turn it into a parameter route.
    if !mount.starts_with('/') || mount.ends_with('/') || mount.contains(['{', '}', '*']) {
        errors.push(ValidationError::MountPrefix(relay.mount_prefix.clone()));
    }

    if !relay.api_prefix.starts_with('/') {
        errors.push(ValidationError::ApiPrefix(relay.api_prefix.clone()));
    }

    if let Err(reason) = check_origin(relay.origin()) {
        errors.push(ValidationError::BackendOrigin {
            origin: relay.origin().to_string(),
            reason,
        });
    }

    if relay.timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if relay.max_body_size == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    let observability = &config.observability;
    if observability.metrics_enabled
        && observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_origin(origin: &str) -> Result<(), String> {
    let url = Url::parse(origin).map_err(|e| e.to_string())?;
    // The outbound connector speaks plain HTTP only.
    if url.scheme() != "http" {
        return Err(format!("unsupported scheme '{}'", url.scheme()));
    }
    if url.host_str().is_none() {
        return Err("missing host".to_string());
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err("origin must not carry a query or fragment".to_string());
    }
    Ok(())
}
