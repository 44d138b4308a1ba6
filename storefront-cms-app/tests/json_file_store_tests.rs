#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
//! Integration tests for `JsonFileStore`.

use storefront_cms_app::adapters::JsonFileStore;
use storefront_cms_core::error::CoreError;
use storefront_cms_core::traits::KeyValueStore;

fn store_in(tmp: &tempfile::TempDir) -> JsonFileStore {
    JsonFileStore::new(tmp.path().join("nested").join("settings.json"))
}

#[tokio::test]
async fn missing_file_is_empty() {
    let tmp = tempfile::tempdir().expect("failed to create temp dir");
    let store = store_in(&tmp);

    assert_eq!(store.get("faqSettings").await.unwrap(), None);
    assert!(store.keys().await.unwrap().is_empty());
    assert!(!store.path().exists());
}

#[tokio::test]
async fn set_creates_directory_and_survives_reopen() {
    let tmp = tempfile::tempdir().expect("failed to create temp dir");
    let store = store_in(&tmp);

    store.set("homepageSettings", r#"{"hero":{}}"#).await.unwrap();
    store.set("faqSettings", "{}").await.unwrap();

    let reopened = store_in(&tmp);
    assert_eq!(
        reopened.get("homepageSettings").await.unwrap().as_deref(),
        Some(r#"{"hero":{}}"#)
    );
    assert_eq!(
        reopened.keys().await.unwrap(),
        vec!["faqSettings".to_string(), "homepageSettings".to_string()]
    );
}

#[tokio::test]
async fn remove_deletes_key_on_disk() {
    let tmp = tempfile::tempdir().expect("failed to create temp dir");
    let store = store_in(&tmp);
    store.set("a", "1").await.unwrap();
    store.set("b", "2").await.unwrap();

    store.remove("a").await.unwrap();
    // removing an absent key is fine
    store.remove("zzz").await.unwrap();

    let reopened = store_in(&tmp);
    assert_eq!(reopened.keys().await.unwrap(), vec!["b".to_string()]);
}

#[tokio::test]
async fn quota_rejects_oversized_write_and_keeps_file() {
    let tmp = tempfile::tempdir().expect("failed to create temp dir");
    let store = store_in(&tmp).with_quota(10);
    store.set("k", "12345").await.unwrap();

    let err = store.set("k2", "1234567890").await.unwrap_err();
    assert!(matches!(err, CoreError::QuotaExceeded { limit: 10, .. }));

    // replacing an existing key only counts the new value
    store.set("k", "123456789").await.unwrap();

    let reopened = store_in(&tmp);
    assert_eq!(reopened.get("k").await.unwrap().as_deref(), Some("123456789"));
    assert_eq!(reopened.get("k2").await.unwrap(), None);
}

#[tokio::test]
async fn corrupt_file_is_a_serialization_error() {
    let tmp = tempfile::tempdir().expect("failed to create temp dir");
    let path = tmp.path().join("settings.json");
    std::fs::write(&path, "{ not json").unwrap();

    let store = JsonFileStore::new(&path);
    let err = store.get("faqSettings").await.unwrap_err();
    assert!(matches!(err, CoreError::SerializationError(_)));
}

#[tokio::test]
async fn concurrent_writes_to_different_keys_are_all_kept() {
    let tmp = tempfile::tempdir().expect("failed to create temp dir");
    let store = std::sync::Arc::new(store_in(&tmp));

    let mut handles = Vec::new();
    for i in 0..8 {
        let store = std::sync::Arc::clone(&store);
        handles.push(tokio::spawn(async move {
            store.set(&format!("key{i}"), "v").await.unwrap();
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let reopened = store_in(&tmp);
    assert_eq!(reopened.keys().await.unwrap().len(), 8);
}

#[tokio::test]
async fn two_handles_on_one_file_keep_each_others_keys() {
    let tmp = tempfile::tempdir().expect("failed to create temp dir");
    let first = store_in(&tmp);
    let second = store_in(&tmp);

    // fill the first handle's cache before the second one writes
    assert_eq!(first.get("faqSettings").await.unwrap(), None);
    second.set("homepageSettings", r#"{"hero":{}}"#).await.unwrap();
    first.set("faqSettings", "{}").await.unwrap();

    let reopened = store_in(&tmp);
    assert_eq!(
        reopened.keys().await.unwrap(),
        vec!["faqSettings".to_string(), "homepageSettings".to_string()]
    );
    // the writer's cache picked up the other key as well
    assert_eq!(
        first.get("homepageSettings").await.unwrap().as_deref(),
        Some(r#"{"hero":{}}"#)
    );

    first.remove("faqSettings").await.unwrap();
    assert_eq!(
        store_in(&tmp).keys().await.unwrap(),
        vec!["homepageSettings".to_string()]
    );
}
