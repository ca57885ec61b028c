//! Metrics collection and exposition.
//!
//! # Metrics
//! - `coach_audits_total` (counter): audits by outcome (success, failure)
//! - `coach_audit_duration_seconds` (histogram): fetch + advisory + store time
//! - `coach_audit_score` (histogram): score of successful audits
//! - `coach_history_reads_total` (counter): history lookups for known clients
//! - `coach_history_entries` (histogram): entries returned per lookup
//!
//! Without an installed recorder every call is a no-op.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus scrape endpoint on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint started"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one audit; `score` is `None` when the audit failed.
pub fn record_audit(score: Option<u32>, start: Instant) {
    let outcome = if score.is_some() { "success" } else { "failure" };
    metrics::counter!("coach_audits_total", "outcome" => outcome).increment(1);
    metrics::histogram!("coach_audit_duration_seconds").record(start.elapsed().as_secs_f64());
    if let Some(score) = score {
        metrics::histogram!("coach_audit_score").record(f64::from(score));
    }
}

pub fn record_history_read(entries: usize) {
    metrics::counter!("coach_history_reads_total").increment(1);
    metrics::histogram!("coach_history_entries").record(entries as f64);
}
