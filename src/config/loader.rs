//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::{RelayConfig, BACKEND_ORIGIN_ENV};
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file, then apply env overrides.
pub fn load_config(path: &Path) -> Result<RelayConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: RelayConfig = toml::from_str(&content)?;
    finalize(config, |key| std::env::var(key).ok())
}

impl RelayConfig {
    /// Defaults plus environment overrides, without a config file.
    pub fn from_env() -> Result<Self, ConfigError> {
        finalize(RelayConfig::default(), |key| std::env::var(key).ok())
    }
}

/// Apply environment overrides and validate.
pub fn finalize<F>(mut config: RelayConfig, env: F) -> Result<RelayConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    config.relay.backend_origin =
        resolve_backend_origin(config.relay.backend_origin.take(), env);
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Pick the backend origin: env vars in priority order, then the file value.
///
/// `None` means the built-in fallback applies.
pub fn resolve_backend_origin<F>(from_file: Option<String>, env: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    BACKEND_ORIGIN_ENV
        .iter()
        .find_map(|key| env(key).filter(|v| !v.trim().is_empty()))
        .or(from_file)
}
