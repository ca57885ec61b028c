//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses and URLs parse
//! - Check backend-specific requirements (file store needs a path)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: CoachConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::{CoachConfig, StoreBackend};

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address '{0}' is not a socket address")]
    BindAddress(String),

    #[error("auditor.user_agent must not be empty")]
    EmptyUserAgent,

    #[error("advisor.base_url '{0}' is not a valid http(s) URL")]
    AdvisorUrl(String),

    #[error("advisor.model must not be empty")]
    EmptyModel,

    #[error("history.path is required for the file backend")]
    MissingHistoryPath,

    #[error("observability.metrics_address '{0}' is not a socket address")]
    MetricsAddress(String),
}

/// Check a parsed configuration, collecting every error found.
pub fn validate_config(config: &CoachConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.listener.bind_address.clone()));
    }

    if config.auditor.user_agent.trim().is_empty() {
        errors.push(ValidationError::EmptyUserAgent);
    }

    match url::Url::parse(&config.advisor.base_url) {
        Ok(u) if matches!(u.scheme(), "http" | "https") => {}
        _ => errors.push(ValidationError::AdvisorUrl(config.advisor.base_url.clone())),
    }

    if config.advisor.model.trim().is_empty() {
        errors.push(ValidationError::EmptyModel);
    }

    if config.history.backend == StoreBackend::File
        && config.history.path.as_deref().map_or(true, |p| p.trim().is_empty())
    {
        errors.push(ValidationError::MissingHistoryPath);
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
