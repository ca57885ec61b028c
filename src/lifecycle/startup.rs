//! Startup orchestration.
//!
//! # Responsibilities
//! - Build the store, fetcher and inference client from configuration
//! - Assemble them into an `AuditService`
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - The configuration is validated here too, so defaults and files get the
//!   same checks
//! - One reqwest client per outbound concern (target fetch has its own UA)

use std::sync::Arc;

use thiserror::Error;

use crate::advisory::{AdvisoryGenerator, HttpInferenceClient};
use crate::audit::{AuditError, AuditService, Checklist, HeaderAuditor, HttpFetcher};
use crate::config::loader::ConfigError;
use crate::config::validation::{validate_config, ValidationError};
use crate::config::{CoachConfig, StoreBackend};
use crate::history::{FileStore, HistoryLedger, KvStore, MemoryStore, StoreError};

/// Errors that abort startup.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to open history store: {0}")]
    Store(#[from] StoreError),

    #[error(transparent)]
    Fetcher(#[from] AuditError),

    #[error("failed to build inference client: {0}")]
    Inference(#[source] reqwest::Error),
}

/// Open the configured history store.
pub async fn open_store(config: &CoachConfig) -> Result<Arc<dyn KvStore>, StartupError> {
    match config.history.backend {
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory history store; history is lost on restart");
            Ok(Arc::new(MemoryStore::new()))
        }
        StoreBackend::File => {
            let path = config
                .history
                .path
                .as_deref()
                .ok_or_else(|| {
                    ConfigError::Validation(vec![ValidationError::MissingHistoryPath])
                })?;
            Ok(Arc::new(FileStore::open(path).await?))
        }
    }
}

/// Build the inference client, reading the API key from the environment.
pub fn inference_client(config: &CoachConfig) -> Result<HttpInferenceClient, StartupError> {
    let api_key = std::env::var(&config.advisor.api_key_env)
        .ok()
        .filter(|k| !k.is_empty());
    if api_key.is_none() {
        tracing::info!(
            env = %config.advisor.api_key_env,
            "No inference API key set, sending unauthenticated requests"
        );
    }

    let client = reqwest::Client::builder()
        .build()
        .map_err(StartupError::Inference)?;

    Ok(HttpInferenceClient::new(
        client,
        &config.advisor.base_url,
        config.advisor.model.clone(),
        api_key,
    ))
}

/// Assemble the audit service from configuration.
pub async fn build_service(config: &CoachConfig) -> Result<AuditService, StartupError> {
    validate_config(config).map_err(ConfigError::Validation)?;

    let fetcher = HttpFetcher::new(&config.auditor.user_agent)?;
    let auditor = HeaderAuditor::new(Checklist::standard(), Arc::new(fetcher));
    let advisor = AdvisoryGenerator::new(Arc::new(inference_client(config)?));
    let ledger = HistoryLedger::new(open_store(config).await?);

    tracing::info!(
        user_agent = %config.auditor.user_agent,
        advisor = %config.advisor.base_url,
        model = %config.advisor.model,
        store = ?config.history.backend,
        "Audit service assembled"
    );

    Ok(AuditService::new(auditor, advisor, ledger))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_build_service_with_defaults() {
        assert!(build_service(&CoachConfig::default()).await.is_ok());
    }

    #[tokio::test]
    async fn test_file_backend_requires_path() {
        let mut config = CoachConfig::default();
        config.history.backend = StoreBackend::File;

        match open_store(&config).await {
            Err(StartupError::Config(ConfigError::Validation(errors))) => {
                assert_eq!(errors, vec![ValidationError::MissingHistoryPath]);
            }
            _ => panic!("expected a validation error"),
        }
    }

    #[tokio::test]
    async fn test_build_service_validates_config() {
        let mut config = CoachConfig::default();
        config.advisor.model = String::new();

        let err = build_service(&config).await.err().expect("invalid config");
        assert!(err.to_string().contains("advisor.model"));
    }
}
