//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → Validate → Open store → Build clients → Assemble service
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → stop accepting → drain in-flight requests → exit
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, then collaborators, then the listener
//! - No background tasks; shutdown only drains open requests

pub mod signals;
pub mod startup;

pub use signals::shutdown_signal;
pub use startup::{build_service, StartupError};
