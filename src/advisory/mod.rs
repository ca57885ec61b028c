//! Advisory subsystem.
//!
//! # Data Flow
//! ```text
//! HeaderReport (found + missing)
//!     → generator.rs (build system + user prompt)
//!     → client.rs (chat completion, JSON-object mode)
//!     → opaque serde_json::Value stored as aiAnalysis
//! ```

pub mod client;
pub mod generator;

pub use client::{AdvisoryError, ChatMessage, HttpInferenceClient, InferenceClient, Role};
pub use generator::AdvisoryGenerator;
