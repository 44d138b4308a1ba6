//! Single source of truth for one settings key

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::{watch, Mutex};

use crate::error::CoreResult;
use crate::services::{KeySubscription, PersistenceService};
use crate::types::SettingsContainer;

/// A settings document shared by every editor and reader of the same key
///
/// The current value lives in a `watch` channel: subscribers get the new `Arc<S>` directly
/// instead of re-reading and re-parsing the store.
///
/// `on_change` takes a complete replacement value; `update` derives it from the latest
/// snapshot under the same lock. The new value is published before it is persisted; if the write fails the in-memory value
/// stays ahead of the store, `is_dirty()` turns true and the error is returned so the caller
/// can report it and call `retry_save()`.
pub struct SettingsDocument<S: SettingsContainer> {
    key: String,
    persistence: Arc<PersistenceService>,
    state: watch::Sender<Arc<S>>,
    revision: AtomicU64,
    dirty: AtomicBool,
    /// Orders publish + persist pairs within this process
    write_lock: Mutex<()>,
}

impl<S: SettingsContainer> SettingsDocument<S> {
    /// Open `key`, loading the stored value (or `S::default()`)
    pub async fn open(persistence: Arc<PersistenceService>, key: impl Into<String>) -> Self {
        let key = key.into();
        let initial = persistence.load(&key, S::default()).await;
        Self::with_value(persistence, key, initial)
    }

    /// Open `key` with a known initial value, without reading the store
    pub fn with_value(persistence: Arc<PersistenceService>, key: impl Into<String>, initial: S) -> Self {
        let (state, _) = watch::channel(Arc::new(initial));
        Self {
            key: key.into(),
            persistence,
            state,
            revision: AtomicU64::new(0),
            dirty: AtomicBool::new(false),
            write_lock: Mutex::new(()),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Current snapshot
    pub fn current(&self) -> Arc<S> {
        Arc::clone(&self.state.borrow())
    }

    /// Typed change stream; the receiver always holds the latest snapshot
    pub fn subscribe(&self) -> watch::Receiver<Arc<S>> {
        self.state.subscribe()
    }

    /// Number of accepted changes since open
    pub fn revision(&self) -> u64 {
        self.revision.load(Ordering::SeqCst)
    }

    /// Whether the in-memory value has not reached the store yet
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Replace the whole document, publish it, and persist it
    pub async fn on_change(&self, next: S) -> CoreResult<()> {
        let _guard = self.write_lock.lock().await;
        let next = Arc::new(next);
        self.publish(Arc::clone(&next));
        self.persist(&next).await
    }

    /// Derive the next value from the current one and commit it, all under the write lock
    ///
    /// `f` sees the latest snapshot, so concurrent updates never build on a stale value.
    /// An error from `f` commits nothing. When `f` returns a value equal to the current one
    /// nothing is published or written. Returns whether a change was committed.
    pub async fn update<F>(&self, f: F) -> CoreResult<bool>
    where
        F: FnOnce(&S) -> CoreResult<S>,
    {
        let _guard = self.write_lock.lock().await;
        let current = self.current();
        let next = f(&current)?;
        if *current == next {
            log::debug!("No change to '{}', skipping save", self.key);
            return Ok(false);
        }
        let next = Arc::new(next);
        self.publish(Arc::clone(&next));
        self.persist(&next).await?;
        Ok(true)
    }

    /// Persist the current snapshot again (after a failed `on_change`)
    pub async fn retry_save(&self) -> CoreResult<()> {
        let _guard = self.write_lock.lock().await;
        let current = self.current();
        self.persist(&current).await
    }

    /// Re-read the store and publish the stored value if it differs
    ///
    /// A missing key reloads as `S::default()`. Returns whether the value changed.
    pub async fn reload(&self) -> CoreResult<bool> {
        let _guard = self.write_lock.lock().await;
        let stored: S = self
            .persistence
            .try_load(&self.key)
            .await?
            .unwrap_or_default();

        if *self.current() == stored {
            return Ok(false);
        }
        self.publish(Arc::new(stored));
        self.dirty.store(false, Ordering::SeqCst);
        log::debug!("Reloaded settings '{}' (rev {})", self.key, self.revision());
        Ok(true)
    }

    /// Reload on every notification for this key until the notifier goes away
    ///
    /// Intended to be spawned for documents that share a store with another writer.
    pub async fn follow(&self, mut subscription: KeySubscription) {
        while let Some(event) = subscription.changed().await {
            if let Err(e) = self.reload().await {
                log::warn!(
                    "Failed to reload '{}' after change rev {}: {e}",
                    self.key,
                    event.revision
                );
            }
        }
    }

    fn publish(&self, value: Arc<S>) {
        self.state.send_replace(value);
        self.revision.fetch_add(1, Ordering::SeqCst);
    }

    async fn persist(&self, value: &S) -> CoreResult<()> {
        match self.persistence.save(&self.key, value).await {
            Ok(_) => {
                self.dirty.store(false, Ordering::SeqCst);
                Ok(())
            }
            Err(e) => {
                self.dirty.store(true, Ordering::SeqCst);
                Err(e)
            }
        }
    }
}
