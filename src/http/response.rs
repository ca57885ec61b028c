//! Response envelopes.
//!
//! # Responsibilities
//! - Map service errors to status codes and JSON error bodies
//! - Attach the identity cookie to successful audits
//!
//! # Design Decisions
//! - Validation errors → 400 `{error}`
//! - Every upstream failure → 500 `{error, details}` with one generic message
//!   per endpoint; `details` carries the full error chain

use std::error::Error as StdError;

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::audit::{AuditOutcome, ServiceError};

pub const AUDIT_FAILURE: &str = "Failed to fetch URL";
pub const HISTORY_FAILURE: &str = "Failed to load history";

/// JSON error body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// A service error bound to the generic message of the failing endpoint.
#[derive(Debug)]
pub struct ApiError {
    error: ServiceError,
    failure_message: &'static str,
}

impl ApiError {
    pub fn audit(error: ServiceError) -> Self {
        Self {
            error,
            failure_message: AUDIT_FAILURE,
        }
    }

    pub fn history(error: ServiceError) -> Self {
        Self {
            error,
            failure_message: HISTORY_FAILURE,
        }
    }

    pub fn status(&self) -> StatusCode {
        if self.error.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    fn body(&self) -> ErrorBody {
        if self.error.is_client_error() {
            ErrorBody {
                error: self.error.to_string(),
                details: None,
            }
        } else {
            ErrorBody {
                error: self.failure_message.to_string(),
                details: Some(error_chain(&self.error)),
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::warn!(error = %error_chain(&self.error), "Request failed upstream");
        }
        (status, Json(self.body())).into_response()
    }
}

/// `Display` of an error followed by each distinct source, joined with ": ".
pub fn error_chain(error: &(dyn StdError + 'static)) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

impl IntoResponse for AuditOutcome {
    fn into_response(self) -> Response {
        let mut response = Json(self.record).into_response();
        if let Some(cookie) = self.set_cookie {
            match HeaderValue::from_str(&cookie) {
                Ok(value) => {
                    response.headers_mut().insert(header::SET_COOKIE, value);
                }
                Err(e) => tracing::error!(error = %e, "Invalid Set-Cookie value"),
            }
        }
        response
    }
}
