//! Key-value stores backing the history ledger.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use thiserror::Error;
use tokio::sync::Mutex;

/// Errors raised by a key-value store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("store file is not valid JSON: {0}")]
    Format(#[from] serde_json::Error),
}

/// Minimal string key-value store.
///
/// Reads and writes are independent; there is no compare-and-swap.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Value stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace the value stored under `key`.
    async fn put(&self, key: &str, value: String) -> Result<(), StoreError>;
}

/// Process-local store; contents are lost on restart.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<DashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys held.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    fn snapshot(&self) -> HashMap<String, String> {
        self.inner
            .iter()
            .map(|r| (r.key().clone(), r.value().clone()))
            .collect()
    }
}

#[async_trait]
impl KvStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.inner.get(key).map(|r| r.value().clone()))
    }

    async fn put(&self, key: &str, value: String) -> Result<(), StoreError> {
        self.inner.insert(key.to_string(), value);
        Ok(())
    }
}

/// Memory store mirrored to a JSON file after every write.
pub struct FileStore {
    memory: MemoryStore,
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Open the store at `path`, loading existing contents if the file exists.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let memory = MemoryStore::new();

        match tokio::fs::read(&path).await {
            Ok(bytes) => {
                let map: HashMap<String, String> = serde_json::from_slice(&bytes)?;
                for (k, v) in map {
                    memory.inner.insert(k, v);
                }
                tracing::info!(path = ?path, keys = memory.len(), "Loaded history store");
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = ?path, "History store file not found, starting empty");
            }
            Err(e) => return Err(e.into()),
        }

        Ok(Self {
            memory,
            path,
            write_lock: Mutex::new(()),
        })
    }

    async fn persist(&self, snapshot: &HashMap<String, String>) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(snapshot)?;
        let tmp = self.path.with_extension("tmp");
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl KvStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.memory.get(key).await
    }

    async fn put(&self, key: &str, value: String) -> Result<(), StoreError> {
        // Writes are serialized so an older snapshot never lands last. Memory
        // only changes once the file write succeeded.
        let _guard = self.write_lock.lock().await;
        let mut snapshot = self.memory.snapshot();
        snapshot.insert(key.to_string(), value.clone());
        self.persist(&snapshot).await?;
        self.memory.put(key, value).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("http-coach-{name}-{}.json", uuid::Uuid::new_v4()))
    }

    #[tokio::test]
    async fn test_memory_store_get_put() {
        let store = MemoryStore::new();
        assert_eq!(store.get("k").await.unwrap(), None);

        store.put("k", "v1".into()).await.unwrap();
        store.put("k", "v2".into()).await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v2"));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_file_store_survives_reload() {
        let path = temp_path("reload");

        let store = FileStore::open(&path).await.unwrap();
        store.put("history:a", "[]".into()).await.unwrap();
        store.put("history:b", "[1]".into()).await.unwrap();
        drop(store);

        let reopened = FileStore::open(&path).await.unwrap();
        assert_eq!(reopened.get("history:a").await.unwrap().as_deref(), Some("[]"));
        assert_eq!(reopened.get("history:b").await.unwrap().as_deref(), Some("[1]"));
        assert_eq!(reopened.get("history:c").await.unwrap(), None);

        std::fs::remove_file(&path).unwrap_or_default();
    }

    #[tokio::test]
    async fn test_failed_file_write_leaves_store_unchanged() {
        let dir = std::env::temp_dir()
            .join(format!("http-coach-missing-{}", uuid::Uuid::new_v4()));
        let store = FileStore::open(dir.join("nested").join("history.json"))
            .await
            .unwrap();

        let result = store.put("history:c", "[]".into()).await;
        assert!(matches!(result, Err(StoreError::Io(_))));
        assert_eq!(store.get("history:c").await.unwrap(), None);
        assert!(store.memory.is_empty());
    }

    #[tokio::test]
    async fn test_file_store_rejects_corrupt_file() {
        let path = temp_path("corrupt");
        std::fs::write(&path, b"not json").unwrap();

        let result = FileStore::open(&path).await;
        assert!(matches!(result, Err(StoreError::Format(_))));

        std::fs::remove_file(&path).unwrap_or_default();
    }
}
