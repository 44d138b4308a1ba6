//! Persistence bridge: serialize, write, notify

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{CoreError, CoreResult};
use crate::services::ServiceContext;

/// Persistence service
///
/// Writes whole settings documents to the `KeyValueStore` as JSON and broadcasts a change
/// after every successful write.
pub struct PersistenceService {
    ctx: Arc<ServiceContext>,
}

impl PersistenceService {
    /// Create the persistence service
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    pub fn context(&self) -> &Arc<ServiceContext> {
        &self.ctx
    }

    /// Serialize `value` and write it under `key`, then notify subscribers
    ///
    /// Failures are logged and returned; nothing is notified for a failed write.
    /// Returns the notification revision on success.
    pub async fn save<T>(&self, key: &str, value: &T) -> CoreResult<u64>
    where
        T: Serialize + ?Sized + Sync,
    {
        let raw = serde_json::to_string(value).map_err(|e| {
            log::error!("Failed to serialize settings '{key}': {e}");
            CoreError::SerializationError(e.to_string())
        })?;

        if let Err(e) = self.ctx.key_value_store.set(key, &raw).await {
            if e.is_expected() {
                log::warn!("Failed to save settings '{key}': {e}");
            } else {
                log::error!("Failed to save settings '{key}': {e}");
            }
            return Err(e);
        }

        log::debug!("Saved settings '{key}' ({} bytes)", raw.len());
        Ok(self.notify(key))
    }

    /// Read and deserialize `key`
    ///
    /// # Returns
    /// * `Ok(Some(value))` - key exists and parsed
    /// * `Ok(None)` - key is absent
    /// * `Err(_)` - storage failure or malformed stored value
    pub async fn try_load<T: DeserializeOwned>(&self, key: &str) -> CoreResult<Option<T>> {
        let Some(raw) = self.ctx.key_value_store.get(key).await? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| CoreError::SerializationError(format!("Invalid settings '{key}': {e}")))
    }

    /// Read `key`, falling back to `default` when absent or unreadable
    pub async fn load<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        match self.try_load(key).await {
            Ok(Some(value)) => value,
            Ok(None) => default,
            Err(e) => {
                log::warn!("Falling back to defaults for '{key}': {e}");
                default
            }
        }
    }

    /// Delete `key` and notify subscribers
    pub async fn remove(&self, key: &str) -> CoreResult<()> {
        self.ctx.key_value_store.remove(key).await?;
        self.notify(key);
        Ok(())
    }

    /// Broadcast a change of `key` without writing
    pub fn notify(&self, key: &str) -> u64 {
        self.ctx.notifier.notify(key)
    }

    /// All stored keys
    pub async fn keys(&self) -> CoreResult<Vec<String>> {
        self.ctx.key_value_store.keys().await
    }
}
