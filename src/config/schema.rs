//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the relay.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Backend origin used when neither the environment nor the file names one.
pub const DEFAULT_BACKEND_ORIGIN: &str = "http://backend:1679";

/// Environment variables consulted for the backend origin, in priority order.
pub const BACKEND_ORIGIN_ENV: [&str; 3] = ["NEXT_PUBLIC_BACKEND_URL", "BACKEND_URL", "API_URL"];

/// Root configuration for the relay.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RelayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Relay gateway settings.
    pub relay: RelaySettings,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:1678").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:1678".to_string(),
        }
    }
}

/// Relay gateway settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RelaySettings {
    /// Path prefix the relay is mounted under (e.g., "/api/proxy").
    pub mount_prefix: String,

    /// Backend origin (scheme + authority). Environment overrides win over this.
    pub backend_origin: Option<String>,

    /// Fixed backend path prefix prepended to every forwarded path.
    pub api_prefix: String,

    /// Ceiling for one outbound call, including reading the backend body.
    pub timeout_secs: u64,

    /// Maximum inbound body size in bytes.
    pub max_body_size: usize,
}

impl Default for RelaySettings {
    fn default() -> Self {
        Self {
            mount_prefix: "/api/proxy".to_string(),
            backend_origin: None,
            api_prefix: "/api/v1".to_string(),
            timeout_secs: 30,
            max_body_size: 2 * 1024 * 1024, // 2MB
        }
    }
}

impl RelaySettings {
    /// Backend origin with the fallback applied and one trailing slash removed.
    pub fn origin(&self) -> &str {
        let origin = self
            .backend_origin
            .as_deref()
            .unwrap_or(DEFAULT_BACKEND_ORIGIN);
        origin.strip_suffix('/').unwrap_or(origin)
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` takes precedence.
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
