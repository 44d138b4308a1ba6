//! 测试辅助模块
//!
//! 提供 mock 实现和便捷的测试工厂方法。

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{CoreError, CoreResult};
use crate::services::{ChangeNotifier, PersistenceService, ServiceContext};
use crate::traits::{InMemoryKeyValueStore, KeyValueStore};

// ===== FailingKeyValueStore =====

/// Store whose writes always fail; reads see an empty store
pub struct FailingKeyValueStore;

#[async_trait]
impl KeyValueStore for FailingKeyValueStore {
    async fn get(&self, _key: &str) -> CoreResult<Option<String>> {
        Ok(None)
    }

    async fn set(&self, key: &str, _value: &str) -> CoreResult<()> {
        Err(CoreError::StorageError(format!("write to '{key}' refused")))
    }

    async fn remove(&self, key: &str) -> CoreResult<()> {
        Err(CoreError::StorageError(format!("remove of '{key}' refused")))
    }

    async fn keys(&self) -> CoreResult<Vec<String>> {
        Ok(Vec::new())
    }
}

// ===== 工厂方法 =====

/// 创建测试用 `ServiceContext`
pub fn create_test_context() -> (Arc<ServiceContext>, Arc<InMemoryKeyValueStore>) {
    let store = Arc::new(InMemoryKeyValueStore::new());
    let ctx = Arc::new(ServiceContext::new(
        store.clone(),
        ChangeNotifier::default(),
    ));
    (ctx, store)
}

/// 创建测试用 `PersistenceService`
pub fn create_test_persistence() -> (Arc<PersistenceService>, Arc<InMemoryKeyValueStore>) {
    let (ctx, store) = create_test_context();
    (Arc::new(PersistenceService::new(ctx)), store)
}
