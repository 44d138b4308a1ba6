//! 业务逻辑服务层

mod change_notifier;
mod persistence_service;
mod settings_document;

pub use change_notifier::{ChangeNotifier, KeySubscription, SettingsChanged};
pub use persistence_service::PersistenceService;
pub use settings_document::SettingsDocument;

use std::sync::Arc;

use crate::traits::KeyValueStore;

/// 服务上下文 - 持有所有依赖
///
/// 平台层需要创建此上下文，并注入平台特定的存储实现。
pub struct ServiceContext {
    /// Durable key-value store
    pub key_value_store: Arc<dyn KeyValueStore>,
    /// Process-wide change broadcast
    pub notifier: ChangeNotifier,
}

impl ServiceContext {
    /// 创建服务上下文
    #[must_use]
    pub fn new(key_value_store: Arc<dyn KeyValueStore>, notifier: ChangeNotifier) -> Self {
        Self {
            key_value_store,
            notifier,
        }
    }

    pub fn key_value_store(&self) -> &Arc<dyn KeyValueStore> {
        &self.key_value_store
    }

    pub fn notifier(&self) -> &ChangeNotifier {
        &self.notifier
    }
}
