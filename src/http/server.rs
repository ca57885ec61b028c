//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, request ID)
//! - Bind server to listener and serve until shutdown
//! - Translate query/cookies into service calls and results into responses

use std::future::Future;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Query, State},
    http::{HeaderMap, Request},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::audit::{AuditOutcome, AuditRecord, AuditService};
use crate::http::cookies::cookies_from_headers;
use crate::http::request::{propagate_request_id_layer, set_request_id_layer, X_REQUEST_ID};
use crate::http::response::ApiError;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<AuditService>,
}

/// HTTP server for the audit API.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server around an assembled service.
    pub fn new(service: AuditService) -> Self {
        let state = AppState {
            service: Arc::new(service),
        };
        Self {
            router: build_router(state),
        }
    }

    /// The router, for serving or driving directly in tests.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections until `shutdown` resolves.
    pub async fn run<F>(self, listener: TcpListener, shutdown: F) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Build the Axum router with all middleware layers.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/audit", get(audit_handler))
        .route("/api/history", get(history_handler))
        .route("/health", get(health_handler))
        .with_state(state)
        .layer(propagate_request_id_layer())
        .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
            let request_id = request
                .headers()
                .get(X_REQUEST_ID)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("unknown");
            tracing::info_span!(
                "request",
                method = %request.method(),
                uri = %request.uri(),
                request_id = %request_id,
            )
        }))
        .layer(set_request_id_layer())
}

/// First value of `name` among the decoded query pairs.
fn first_param<'a>(params: &'a [(String, String)], name: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
}

/// `GET /api/audit?url=<https-url>`
///
/// When `url` is repeated the first occurrence wins.
async fn audit_handler(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
    headers: HeaderMap,
) -> Result<AuditOutcome, ApiError> {
    let cookies = cookies_from_headers(&headers);
    state
        .service
        .submit(first_param(&params, "url"), &cookies)
        .await
        .map_err(ApiError::audit)
}

/// `GET /api/history`
async fn history_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<AuditRecord>>, ApiError> {
    let cookies = cookies_from_headers(&headers);
    state
        .service
        .history(&cookies)
        .await
        .map(Json)
        .map_err(ApiError::history)
}

#[derive(Serialize)]
struct HealthStatus {
    status: &'static str,
    version: &'static str,
}

async fn health_handler() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
