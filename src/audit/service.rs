//! Audit orchestration.
//!
//! # Responsibilities
//! - Validate the requested URL before any network call
//! - Resolve (or mint) the client identity
//! - Run audit → advisory → history append, in order
//! - Serve the read-only history path
//!
//! # Design Decisions
//! - Every step after validation is awaited sequentially; no retries
//! - Any failure after validation aborts the request: no history write and
//!   no identity cookie
//! - Dependencies are injected; the service holds no global state

use std::time::Instant;

use thiserror::Error;

use crate::advisory::{AdvisoryError, AdvisoryGenerator};
use crate::audit::auditor::{AuditError, HeaderAuditor};
use crate::audit::identity::ClientIdentity;
use crate::audit::record::AuditRecord;
use crate::history::{HistoryLedger, LedgerError};
use crate::http::cookies::Cookies;
use crate::observability::metrics;

/// Rejected `url` parameter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UrlError {
    #[error("Missing url parameter")]
    Missing,

    #[error("URL must use https://")]
    NotHttps,
}

/// Everything that can fail while serving an audit or history request.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    InvalidUrl(#[from] UrlError),

    #[error(transparent)]
    Audit(#[from] AuditError),

    #[error(transparent)]
    Advisory(#[from] AdvisoryError),

    #[error(transparent)]
    History(#[from] LedgerError),
}

impl ServiceError {
    /// True for caller mistakes, false for upstream failures.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidUrl(_))
    }
}

/// A completed audit and the cookie to set, if a new identity was minted.
#[derive(Debug, Clone)]
pub struct AuditOutcome {
    pub record: AuditRecord,
    pub set_cookie: Option<String>,
}

/// Check the `url` parameter: present, non-empty and `https://`.
pub fn validate_target(url: Option<&str>) -> Result<&str, UrlError> {
    match url {
        None | Some("") => Err(UrlError::Missing),
        Some(u) if !u.starts_with("https://") => Err(UrlError::NotHttps),
        Some(u) => Ok(u),
    }
}

/// Composes auditor, advisor and ledger into the request cycle.
#[derive(Clone)]
pub struct AuditService {
    auditor: HeaderAuditor,
    advisor: AdvisoryGenerator,
    ledger: HistoryLedger,
}

impl AuditService {
    pub fn new(auditor: HeaderAuditor, advisor: AdvisoryGenerator, ledger: HistoryLedger) -> Self {
        Self {
            auditor,
            advisor,
            ledger,
        }
    }

    /// Audit `url` on behalf of the client identified by `cookies`.
    pub async fn submit(
        &self,
        url: Option<&str>,
        cookies: &Cookies,
    ) -> Result<AuditOutcome, ServiceError> {
        let target = validate_target(url)?;
        let identity = ClientIdentity::resolve(cookies);
        let start = Instant::now();

        let result = self.run_audit(target, &identity).await;
        metrics::record_audit(result.as_ref().ok().map(|r| r.score), start);

        let record = result?;
        tracing::info!(
            url = %target,
            score = record.score,
            missing = record.missing.len(),
            new_client = identity.is_minted(),
            "Audit completed"
        );

        Ok(AuditOutcome {
            record,
            set_cookie: identity.set_cookie(),
        })
    }

    async fn run_audit(
        &self,
        target: &str,
        identity: &ClientIdentity,
    ) -> Result<AuditRecord, ServiceError> {
        let report = self.auditor.audit(target).await?;
        let analysis = self
            .advisor
            .advise(target, &report.headers_found, &report.missing)
            .await?;

        let record = AuditRecord::new(target, report, analysis);
        self.ledger.append(identity.id(), record.clone()).await?;
        Ok(record)
    }

    /// Stored history for the client; empty when the client has no identity.
    pub async fn history(&self, cookies: &Cookies) -> Result<Vec<AuditRecord>, ServiceError> {
        let Some(identity) = ClientIdentity::from_cookies(cookies) else {
            return Ok(Vec::new());
        };

        let history = self.ledger.read(identity.id()).await?;
        metrics::record_history_read(history.len());
        Ok(history)
    }
}
