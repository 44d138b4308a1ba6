//! Process-wide change notification
//!
//! Fired after every successful write so that independently held copies of a settings
//! document can refresh. Events carry the key and a monotonically increasing revision,
//! never the value itself.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::broadcast::{self, error::RecvError, error::TryRecvError};

/// A settings key was written or removed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsChanged {
    pub key: String,
    pub revision: u64,
}

/// Broadcast hub for `SettingsChanged` events
///
/// Cloning shares the same channel.
#[derive(Clone)]
pub struct ChangeNotifier {
    sender: broadcast::Sender<SettingsChanged>,
    revision: Arc<AtomicU64>,
}

impl ChangeNotifier {
    /// Default number of buffered events per subscriber
    pub const DEFAULT_CAPACITY: usize = 64;

    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            sender,
            revision: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Broadcast a change of `key` (fire-and-forget)
    ///
    /// Returns the revision assigned to the event.
    pub fn notify(&self, key: &str) -> u64 {
        let revision = self.revision.fetch_add(1, Ordering::SeqCst) + 1;
        let event = SettingsChanged {
            key: key.to_string(),
            revision,
        };
        match self.sender.send(event) {
            Ok(receivers) => {
                log::debug!("Notified {receivers} subscriber(s) of change to '{key}' (rev {revision})");
            }
            Err(_) => log::debug!("Change to '{key}' (rev {revision}) has no subscribers"),
        }
        revision
    }

    /// Latest revision handed out
    pub fn revision(&self) -> u64 {
        self.revision.load(Ordering::SeqCst)
    }

    /// Receive every event
    pub fn subscribe(&self) -> broadcast::Receiver<SettingsChanged> {
        self.sender.subscribe()
    }

    /// Receive events for one key only
    pub fn subscribe_key(&self, key: impl Into<String>) -> KeySubscription {
        KeySubscription {
            key: key.into(),
            receiver: self.sender.subscribe(),
            revision: Arc::clone(&self.revision),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for ChangeNotifier {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

/// Subscription filtered to a single key
///
/// If the subscriber falls behind and events are dropped, the next call reports a change
/// with the latest known revision: readers reload in full, so a missed event only needs to
/// trigger one reload.
pub struct KeySubscription {
    key: String,
    receiver: broadcast::Receiver<SettingsChanged>,
    revision: Arc<AtomicU64>,
}

impl KeySubscription {
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Wait for the next change of this key; `None` once the notifier is gone
    pub async fn changed(&mut self) -> Option<SettingsChanged> {
        loop {
            match self.receiver.recv().await {
                Ok(event) if event.key == self.key => return Some(event),
                Ok(_) => {}
                Err(RecvError::Lagged(skipped)) => {
                    log::warn!("Subscriber of '{}' lagged by {skipped} event(s)", self.key);
                    return Some(self.missed());
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }

    /// Non-blocking variant of `changed`
    pub fn try_changed(&mut self) -> Option<SettingsChanged> {
        loop {
            match self.receiver.try_recv() {
                Ok(event) if event.key == self.key => return Some(event),
                Ok(_) => {}
                Err(TryRecvError::Lagged(skipped)) => {
                    log::warn!("Subscriber of '{}' lagged by {skipped} event(s)", self.key);
                    return Some(self.missed());
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => return None,
            }
        }
    }

    fn missed(&self) -> SettingsChanged {
        SettingsChanged {
            key: self.key.clone(),
            revision: self.revision.load(Ordering::SeqCst),
        }
    }
}
