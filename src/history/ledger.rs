//! Per-client bounded audit history.
//!
//! # Design Decisions
//! - Newest first, at most `HISTORY_CAPACITY` entries after any write
//! - Append is get → prepend → truncate → put with no lock; two concurrent
//!   appends for the same client can lose one entry (last writer wins)
//! - A stored value that does not parse is an error, never reset to empty

use std::sync::Arc;

use thiserror::Error;

use crate::audit::record::AuditRecord;
use crate::history::store::{KvStore, StoreError};

/// Maximum records kept per client.
pub const HISTORY_CAPACITY: usize = 20;

const KEY_PREFIX: &str = "history:";

/// Errors that can occur while reading or writing history.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The stored list for a client could not be decoded.
    #[error("stored history for '{key}' is corrupt: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode history: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Store key for a client's history list.
pub fn history_key(client_id: &str) -> String {
    format!("{KEY_PREFIX}{client_id}")
}

/// Rolling audit history keyed by client identity.
#[derive(Clone)]
pub struct HistoryLedger {
    store: Arc<dyn KvStore>,
}

impl HistoryLedger {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    /// Prepend `record` to the client's history, dropping the oldest
    /// entries beyond capacity. Returns the new length.
    pub async fn append(&self, client_id: &str, record: AuditRecord) -> Result<usize, LedgerError> {
        let key = history_key(client_id);
        let mut history = self.load(&key).await?;

        history.insert(0, record);
        history.truncate(HISTORY_CAPACITY);

        let encoded = serde_json::to_string(&history).map_err(LedgerError::Encode)?;
        self.store.put(&key, encoded).await?;

        tracing::debug!(key = %key, entries = history.len(), "History updated");
        Ok(history.len())
    }

    /// The client's history, newest first; empty when nothing is stored.
    pub async fn read(&self, client_id: &str) -> Result<Vec<AuditRecord>, LedgerError> {
        self.load(&history_key(client_id)).await
    }

    async fn load(&self, key: &str) -> Result<Vec<AuditRecord>, LedgerError> {
        match self.store.get(key).await? {
            None => Ok(Vec::new()),
            Some(raw) => serde_json::from_str(&raw).map_err(|source| LedgerError::Corrupt {
                key: key.to_string(),
                source,
            }),
        }
    }
}
