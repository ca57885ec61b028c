//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use http_coach::advisory::{AdvisoryError, AdvisoryGenerator, ChatMessage, InferenceClient};
use http_coach::audit::{AuditError, AuditService, Checklist, HeaderAuditor, PageFetcher};
use http_coach::history::{HistoryLedger, KvStore, MemoryStore};
use http_coach::HttpServer;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Values a well-configured site would send for every checklist header.
pub const GOOD_HEADERS: [(&str, &str); 5] = [
    ("content-security-policy", "default-src 'self'"),
    ("strict-transport-security", "max-age=63072000; includeSubDomains"),
    ("x-content-type-options", "nosniff"),
    ("x-frame-options", "DENY"),
    ("referrer-policy", "no-referrer"),
];

/// Start a raw-TCP backend answering every request with `status` and `headers`.
///
/// Returns the bound address.
pub async fn start_header_backend(
    status: &'static str,
    headers: Vec<(&'static str, &'static str)>,
) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let headers = headers.clone();
            tokio::spawn(async move {
                let mut buf = [0u8; 4096];
                let _ = socket.read(&mut buf).await;

                let mut response = format!("HTTP/1.1 {}\r\n", status);
                for (name, value) in headers {
                    response.push_str(&format!("{}: {}\r\n", name, value));
                }
                response.push_str("Content-Length: 2\r\nConnection: close\r\n\r\nok");

                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    addr
}

/// Fetcher returning canned headers or a canned connection failure.
pub struct StubFetcher {
    headers: Option<HeaderMap>,
    pub calls: AtomicUsize,
}

impl StubFetcher {
    pub fn with_headers(pairs: &[(&str, &str)]) -> Self {
        let mut headers = HeaderMap::new();
        for (name, value) in pairs {
            headers.insert(
                HeaderName::from_bytes(name.as_bytes()).unwrap(),
                HeaderValue::from_str(value).unwrap(),
            );
        }
        Self {
            headers: Some(headers),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            headers: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageFetcher for StubFetcher {
    async fn fetch_headers(&self, _url: &str) -> Result<HeaderMap, AuditError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.headers {
            Some(headers) => Ok(headers.clone()),
            None => {
                // A real connection error: nothing listens on port 1.
                let err = reqwest::Client::new()
                    .get("http://127.0.0.1:1/")
                    .send()
                    .await
                    .unwrap_err();
                Err(AuditError::Fetch(err))
            }
        }
    }
}

/// Inference client returning a fixed advisory, or failing.
pub struct StubInference {
    fail: bool,
    pub calls: AtomicUsize,
}

impl StubInference {
    pub fn ok() -> Self {
        Self {
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            calls: AtomicUsize::new(0),
        }
    }
}

pub fn sample_advice() -> Value {
    json!({
        "explanation": "Some headers are missing.",
        "suggestions": {"x-frame-options": "DENY"},
        "warnings": "A strict CSP may block inline scripts."
    })
}

#[async_trait]
impl InferenceClient for StubInference {
    async fn complete_json(&self, _messages: &[ChatMessage]) -> Result<Value, AdvisoryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            Err(AdvisoryError::Status {
                status: 500,
                body: "model unavailable".into(),
            })
        } else {
            Ok(sample_advice())
        }
    }
}

/// A fully wired service over stub collaborators.
pub struct TestApp {
    pub fetcher: Arc<StubFetcher>,
    pub inference: Arc<StubInference>,
    pub store: Arc<MemoryStore>,
    pub service: AuditService,
}

impl TestApp {
    pub fn new(fetcher: StubFetcher, inference: StubInference) -> Self {
        let fetcher = Arc::new(fetcher);
        let inference = Arc::new(inference);
        let store = Arc::new(MemoryStore::new());

        let service = AuditService::new(
            HeaderAuditor::new(Checklist::standard(), fetcher.clone()),
            AdvisoryGenerator::new(inference.clone()),
            HistoryLedger::new(store.clone() as Arc<dyn KvStore>),
        );

        Self {
            fetcher,
            inference,
            store,
            service,
        }
    }

    pub fn router(&self) -> Router {
        HttpServer::new(self.service.clone()).router()
    }
}
