//! Audit subsystem.
//!
//! # Data Flow
//! ```text
//! GET /api/audit?url=...
//!     → service.rs (validate url, resolve identity)
//!     → auditor.rs (fetch target, score against checklist.rs)
//!     → advisory (remediation advice)
//!     → record.rs (AuditRecord with UTC timestamp)
//!     → history ledger (prepend, cap)
//! ```
//!
//! # Design Decisions
//! - The checklist is built once and injected; never mutated
//! - Identity is anonymous: a random cookie value, never validated

pub mod auditor;
pub mod checklist;
pub mod identity;
pub mod record;
pub mod service;

pub use auditor::{AuditError, HeaderAuditor, HttpFetcher, PageFetcher};
pub use checklist::Checklist;
pub use identity::ClientIdentity;
pub use record::{AuditRecord, FoundHeaders, HeaderReport};
pub use service::{AuditOutcome, AuditService, ServiceError, UrlError};
