//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handlers and services produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout, pretty or JSON)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Request ID flows through every request span (tower-http)
//! - Metrics are cheap; disabled exporter means no-op recorder

pub mod logging;
pub mod metrics;
