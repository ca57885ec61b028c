//! Fetching audit targets and scoring their response headers.
//!
//! # Responsibilities
//! - Issue one GET per audit, following redirects
//! - Score the final response against the checklist
//!
//! # Design Decisions
//! - HTTP error statuses are not failures; headers are read regardless
//! - Only connection-level errors (DNS, TLS, connect) fail an audit
//! - No timeout beyond reqwest's defaults

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::redirect::Policy;
use thiserror::Error;

use crate::audit::checklist::{Checklist, POINTS_PER_HEADER};
use crate::audit::record::{FoundHeaders, HeaderReport};

const MAX_REDIRECTS: usize = 10;

/// Errors that can occur while fetching an audit target.
#[derive(Debug, Error)]
pub enum AuditError {
    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// The target could not be reached.
    #[error("{0}")]
    Fetch(#[from] reqwest::Error),
}

/// Source of response headers for a target URL.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch `url` and return the final response's headers.
    async fn fetch_headers(&self, url: &str) -> Result<HeaderMap, AuditError>;
}

/// reqwest-backed fetcher with a fixed User-Agent.
#[derive(Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str) -> Result<Self, AuditError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .redirect(Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(AuditError::Client)?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch_headers(&self, url: &str) -> Result<HeaderMap, AuditError> {
        let response = self.client.get(url).send().await?;
        tracing::debug!(
            url = %url,
            final_url = %response.url(),
            status = %response.status(),
            "Fetched audit target"
        );
        Ok(response.headers().clone())
    }
}

/// Scores a target's response headers against the checklist.
#[derive(Clone)]
pub struct HeaderAuditor {
    checklist: Checklist,
    fetcher: Arc<dyn PageFetcher>,
}

impl HeaderAuditor {
    pub fn new(checklist: Checklist, fetcher: Arc<dyn PageFetcher>) -> Self {
        Self { checklist, fetcher }
    }

    /// Fetch `target_url` and score it.
    ///
    /// The caller is responsible for validating the URL first.
    pub async fn audit(&self, target_url: &str) -> Result<HeaderReport, AuditError> {
        let headers = self.fetcher.fetch_headers(target_url).await?;
        Ok(score_headers(&self.checklist, &headers))
    }
}

/// Score a header map: 20 points per checklist header with a non-empty value.
pub fn score_headers(checklist: &Checklist, headers: &HeaderMap) -> HeaderReport {
    let mut report = HeaderReport {
        score: 0,
        headers_found: FoundHeaders::new(),
        missing: Vec::new(),
    };

    for &name in checklist.headers() {
        match header_value(headers, name) {
            Some(value) => {
                report.headers_found.insert(name, value);
                report.score += POINTS_PER_HEADER;
            }
            None => report.missing.push(name.to_string()),
        }
    }

    report
}

/// All values of `name` joined with ", ", or None if absent or empty.
fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    let joined = headers
        .get_all(name)
        .iter()
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
        .collect::<Vec<_>>()
        .join(", ");

    (!joined.is_empty()).then_some(joined)
}
