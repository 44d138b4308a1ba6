//! JSON file `KeyValueStore`
//!
//! All keys live in one JSON object `{ "<key>": "<serialized value>" }`. Reads are served
//! from a cache filled on first use. Every write re-reads the file, applies the change, and
//! rewrites the whole object through a temp file and a rename, so keys written by another
//! store on the same file survive and a crash mid-write leaves the previous file intact.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{RwLock, RwLockReadGuard};

use storefront_cms_core::error::{CoreError, CoreResult};
use storefront_cms_core::traits::KeyValueStore;

type Entries = BTreeMap<String, String>;

pub struct JsonFileStore {
    path: PathBuf,
    cache: Arc<RwLock<Option<Entries>>>,
    quota_bytes: Option<usize>,
}

impl JsonFileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: Arc::new(RwLock::new(None)),
            quota_bytes: None,
        }
    }

    /// Reject writes that would push keys + values past `bytes`
    #[must_use]
    pub fn with_quota(mut self, bytes: usize) -> Self {
        self.quota_bytes = Some(bytes);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_file(&self) -> CoreResult<Entries> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Entries::new()),
            Err(e) => {
                return Err(CoreError::StorageError(format!(
                    "Failed to read {}: {e}",
                    self.path.display()
                )))
            }
        };

        if raw.trim().is_empty() {
            return Ok(Entries::new());
        }
        serde_json::from_str(&raw).map_err(|e| {
            CoreError::SerializationError(format!("Corrupt store {}: {e}", self.path.display()))
        })
    }

    async fn write_file(&self, entries: &Entries) -> CoreResult<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| CoreError::StorageError(format!("Failed to create directory: {e}")))?;
        }

        let raw = serde_json::to_string_pretty(entries)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, raw)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to write {}: {e}", tmp.display())))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| {
                CoreError::StorageError(format!("Failed to replace {}: {e}", self.path.display()))
            })
    }

    /// Read guard over the cache, loading the file on first use (double-checked)
    async fn loaded(&self) -> CoreResult<RwLockReadGuard<'_, Option<Entries>>> {
        let cache = self.cache.read().await;
        if cache.is_some() {
            return Ok(cache);
        }
        drop(cache);

        let mut cache = self.cache.write().await;
        if cache.is_none() {
            let entries = self.read_file().await?;
            log::debug!("Loaded {} key(s) from {}", entries.len(), self.path.display());
            *cache = Some(entries);
        }
        Ok(cache.downgrade())
    }

    /// Apply `f` to the file's current contents under the write lock
    ///
    /// The file is re-read first so changes made through another handle are kept. The
    /// cache only moves forward once the file is written.
    async fn update<F>(&self, f: F) -> CoreResult<()>
    where
        F: FnOnce(&mut Entries) -> CoreResult<bool> + Send,
    {
        let mut cache = self.cache.write().await;
        let mut entries = self.read_file().await?;

        if f(&mut entries)? {
            self.write_file(&entries).await?;
        }
        *cache = Some(entries);
        Ok(())
    }

    fn check_quota(&self, entries: &Entries, key: &str, value: &str) -> CoreResult<()> {
        let Some(limit) = self.quota_bytes else {
            return Ok(());
        };
        let others: usize = entries
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum();
        if others + key.len() + value.len() > limit {
            return Err(CoreError::QuotaExceeded {
                key: key.to_string(),
                limit,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for JsonFileStore {
    async fn get(&self, key: &str) -> CoreResult<Option<String>> {
        let cache = self.loaded().await?;
        Ok(cache.as_ref().and_then(|entries| entries.get(key).cloned()))
    }

    async fn set(&self, key: &str, value: &str) -> CoreResult<()> {
        self.update(|entries| {
            self.check_quota(entries, key, value)?;
            entries.insert(key.to_string(), value.to_string());
            Ok(true)
        })
        .await
    }

    async fn remove(&self, key: &str) -> CoreResult<()> {
        self.update(|entries| Ok(entries.remove(key).is_some())).await
    }

    async fn keys(&self) -> CoreResult<Vec<String>> {
        let cache = self.loaded().await?;
        Ok(cache
            .as_ref()
            .map(|entries| entries.keys().cloned().collect())
            .unwrap_or_default())
    }
}
