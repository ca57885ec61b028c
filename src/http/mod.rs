//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, routes)
//!     → request.rs (request ID)
//!     → cookies.rs (client_id lookup)
//!     → audit service
//!     → response.rs (JSON envelope, Set-Cookie, error mapping)
//!     → Send to client
//! ```

pub mod cookies;
pub mod request;
pub mod response;
pub mod server;

pub use cookies::{parse_cookies, Cookies};
pub use request::X_REQUEST_ID;
pub use response::ApiError;
pub use server::{build_router, AppState, HttpServer};
