//! HTTP security header audit service library.

pub mod advisory;
pub mod audit;
pub mod config;
pub mod history;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use audit::AuditService;
pub use config::schema::CoachConfig;
pub use http::HttpServer;
