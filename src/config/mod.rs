//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → CoachConfig (validated, immutable)
//!     → consumed once at startup to build the service
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use schema::AdvisorConfig;
pub use schema::AuditorConfig;
pub use schema::CoachConfig;
pub use schema::HistoryConfig;
pub use schema::ListenerConfig;
pub use schema::ObservabilityConfig;
pub use schema::{LogFormat, StoreBackend};
