//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the audit service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct CoachConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Outbound fetch settings for audited sites.
    pub auditor: AuditorConfig,

    /// Inference service used to generate advisories.
    pub advisor: AdvisorConfig,

    /// Audit history storage.
    pub history: HistoryConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Settings for fetching audit targets.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AuditorConfig {
    /// User-Agent sent with every audit fetch.
    pub user_agent: String,
}

impl Default for AuditorConfig {
    fn default() -> Self {
        Self {
            user_agent: "HTTP-Coach-Scanner/1.0".to_string(),
        }
    }
}

/// OpenAI-compatible chat completions endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AdvisorConfig {
    /// Base URL; `/chat/completions` is appended.
    pub base_url: String,

    /// Model identifier passed through to the endpoint.
    pub model: String,

    /// Environment variable holding the bearer token (unset = no auth).
    pub api_key_env: String,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434/v1".to_string(),
            model: "llama-3.3-70b-instruct".to_string(),
            api_key_env: "COACH_INFERENCE_API_KEY".to_string(),
        }
    }
}

/// Which key-value store backs the history ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Memory,
    File,
}

/// History storage configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct HistoryConfig {
    /// Store implementation.
    pub backend: StoreBackend,

    /// JSON file path, required for the file backend.
    pub path: Option<String>,
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
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
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
