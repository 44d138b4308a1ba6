//! Durable string-keyed store abstraction

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{CoreError, CoreResult};

/// Key-value store Trait
///
/// Holds one serialized settings document per key.
///
/// Platform implementations:
/// - `InMemoryKeyValueStore` (this crate, browser local-storage analogue)
/// - `JsonFileStore` (app crate, single JSON file on disk)
/// - `SqliteStore` (app crate, `SeaORM`, `sqlite-store` feature)
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the raw value of a key
    ///
    /// # Returns
    /// * `Some(value)` - key exists
    /// * `None` - key is absent
    async fn get(&self, key: &str) -> CoreResult<Option<String>>;

    /// Write (insert or overwrite) the raw value of a key
    async fn set(&self, key: &str, value: &str) -> CoreResult<()>;

    /// Remove a key (absent keys are not an error)
    async fn remove(&self, key: &str) -> CoreResult<()>;

    /// List all stored keys, sorted
    async fn keys(&self) -> CoreResult<Vec<String>>;
}

/// In-memory key-value store
///
/// Default implementation, available on all platforms. An optional byte quota mimics the
/// browser local-storage limit: a write that would push the total size of keys and values
/// past the quota fails with `QuotaExceeded` and leaves the store unchanged.
#[derive(Clone, Default)]
pub struct InMemoryKeyValueStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
    quota_bytes: Option<usize>,
}

impl InMemoryKeyValueStore {
    /// Create an unbounded in-memory store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that rejects writes beyond `quota_bytes`
    #[must_use]
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            quota_bytes: Some(quota_bytes),
        }
    }

    /// Total bytes currently used (keys + values)
    pub async fn used_bytes(&self) -> usize {
        usage(&*self.entries.read().await)
    }
}

fn usage(entries: &HashMap<String, String>) -> usize {
    entries.iter().map(|(k, v)| k.len() + v.len()).sum()
}

#[async_trait]
impl KeyValueStore for InMemoryKeyValueStore {
    async fn get(&self, key: &str) -> CoreResult<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> CoreResult<()> {
        let mut entries = self.entries.write().await;

        if let Some(limit) = self.quota_bytes {
            let current = usage(&entries);
            let replaced = entries.get(key).map_or(0, |old| key.len() + old.len());
            let projected = current - replaced + key.len() + value.len();
            if projected > limit {
                return Err(CoreError::QuotaExceeded {
                    key: key.to_string(),
                    limit,
                });
            }
        }

        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> CoreResult<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }

    async fn keys(&self) -> CoreResult<Vec<String>> {
        let mut keys: Vec<String> = self.entries.read().await.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}
