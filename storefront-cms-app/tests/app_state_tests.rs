#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
//! Integration tests for `AppStateBuilder`, `AppState` startup and `SectionEditor`.

use std::sync::atomic::Ordering;
use std::sync::Arc;

use storefront_cms_app::{AppConfig, AppState, AppStateBuilder, StorageBackend};
use storefront_cms_core::error::CoreError;
use storefront_cms_core::traits::{InMemoryKeyValueStore, KeyValueStore};
use storefront_cms_core::types::{
    FaqSettings, FieldValue, HomepageSettings, FAQ_SETTINGS_KEY, HOMEPAGE_SETTINGS_KEY,
};
use storefront_cms_core::MoveDirection;

fn memory_state() -> (AppState, Arc<InMemoryKeyValueStore>) {
    let store = Arc::new(InMemoryKeyValueStore::new());
    let state = AppStateBuilder::new()
        .key_value_store(store.clone())
        .build()
        .expect("build should succeed");
    (state, store)
}

fn json_config(tmp: &tempfile::TempDir) -> AppConfig {
    AppConfig {
        data_dir: Some(tmp.path().to_path_buf()),
        backend: StorageBackend::JsonFile,
        ..AppConfig::default()
    }
}

// ===== Builder =====

#[test]
fn build_without_store_fails() {
    let err = AppStateBuilder::new().build().err().unwrap();
    assert!(matches!(err, CoreError::ValidationError(_)));
}

#[tokio::test]
async fn startup_with_empty_store_uses_defaults() {
    let (state, _) = memory_state();
    state.run_startup().await.unwrap();

    assert!(state.startup_completed.load(Ordering::SeqCst));
    assert_eq!(*state.homepage.current(), HomepageSettings::default());
    assert_eq!(*state.faq.current(), FaqSettings::default());
}

#[tokio::test]
async fn startup_loads_stored_documents() {
    let (state, store) = memory_state();
    store
        .set(FAQ_SETTINGS_KEY, r#"{"title":"Help centre","items":[]}"#)
        .await
        .unwrap();

    state.run_startup().await.unwrap();

    assert_eq!(state.faq.current().title, "Help centre");
    // fields missing from the stored snapshot keep their defaults
    assert!(state.faq.current().enabled);
}

#[tokio::test]
async fn startup_tolerates_corrupt_document() {
    let (state, store) = memory_state();
    store.set(HOMEPAGE_SETTINGS_KEY, "[1, 2").await.unwrap();

    state.run_startup().await.unwrap();

    assert_eq!(*state.homepage.current(), HomepageSettings::default());
    assert!(state.startup_completed.load(Ordering::SeqCst));
}

#[tokio::test]
async fn sqlite_backend_without_feature_is_rejected() {
    if cfg!(feature = "sqlite-store") {
        return;
    }
    let tmp = tempfile::tempdir().expect("failed to create temp dir");
    let config = AppConfig {
        backend: StorageBackend::Sqlite,
        ..json_config(&tmp)
    };
    let err = AppState::from_config(&config).await.err().unwrap();
    assert!(matches!(err, CoreError::ValidationError(_)));
}

// ===== SectionEditor =====

#[tokio::test]
async fn faq_scenario_add_edit_reorder_delete() {
    let (state, store) = memory_state();
    let mut editor = state.faq_editor();
    assert!(editor.is_empty());

    let first = editor.add().await.unwrap();
    let second = editor.add().await.unwrap();
    assert_eq!(editor.list().expanded_id(), Some(second.as_str()));

    editor
        .update_field(&first, "question", "Do you ship abroad?".into())
        .await
        .unwrap();
    editor
        .update_field(&second, "enabled", FieldValue::Flag(false))
        .await
        .unwrap();

    editor.move_item(1, MoveDirection::Up).await.unwrap();
    let ids: Vec<String> = editor.rows().into_iter().map(|row| row.id).collect();
    assert_eq!(ids, vec![second.clone(), first.clone()]);

    assert!(editor.request_delete(&second));
    editor.confirm_delete(&second).await.unwrap();
    assert_eq!(editor.list().expanded_id(), None);

    let rows = editor.rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].label, "Do you ship abroad?");

    // every accepted change reached the store
    let raw = store.get(FAQ_SETTINGS_KEY).await.unwrap().unwrap();
    let stored: FaqSettings = serde_json::from_str(&raw).unwrap();
    assert_eq!(stored, *state.faq.current());
}

#[tokio::test]
async fn editors_share_one_document() {
    let (state, _) = memory_state();
    let mut steps = state.homepage_editor(HomepageSettings::STEPS);
    let mut stats = state.homepage_editor(HomepageSettings::STATS);
    let mut rx = state.homepage.subscribe();

    let step_id = steps.add().await.unwrap();
    stats.add().await.unwrap();

    assert!(rx.has_changed().unwrap());
    let current = rx.borrow_and_update().clone();
    assert_eq!(current.how_it_works.steps.len(), 1);
    assert_eq!(current.stats.items.len(), 1);
    assert_eq!(current.how_it_works.steps[0].id, step_id);
}

#[tokio::test]
async fn set_enabled_flips_section_gate() {
    let (state, _) = memory_state();
    let editor = state.homepage_editor(HomepageSettings::TESTIMONIALS);

    assert!(editor
        .set_enabled(HomepageSettings::TESTIMONIALS_ENABLED, false)
        .await
        .unwrap());
    // already off
    assert!(!editor
        .set_enabled(HomepageSettings::TESTIMONIALS_ENABLED, false)
        .await
        .unwrap());

    assert!(!state.homepage.current().testimonials.enabled);
    assert!(state.homepage.current().hero.enabled);
    assert_eq!(state.homepage.revision(), 1);
}

#[tokio::test]
async fn unchanged_operations_do_not_write() {
    let (state, store) = memory_state();
    let mut editor = state.faq_editor();

    editor.move_item(0, MoveDirection::Up).await.unwrap();
    editor
        .update_field("missing", "question", "x".into())
        .await
        .unwrap();

    assert_eq!(state.faq.revision(), 0);
    assert!(store.get(FAQ_SETTINGS_KEY).await.unwrap().is_none());
}

#[tokio::test]
async fn confirm_without_request_is_rejected() {
    let (state, _) = memory_state();
    let mut editor = state.faq_editor();
    let id = editor.add().await.unwrap();

    let err = editor.confirm_delete(&id).await.unwrap_err();
    assert!(err.is_expected());
    assert_eq!(state.faq.current().items.len(), 1);
}

#[tokio::test]
async fn add_with_rejected_field_saves_nothing() {
    let (state, store) = memory_state();
    let mut editor = state.faq_editor();

    let err = editor
        .add_with(vec![
            ("question".to_string(), "Why?".into()),
            ("enabled".to_string(), "yes".into()),
        ])
        .await
        .unwrap_err();

    assert!(matches!(err, CoreError::FieldTypeMismatch { .. }));
    assert!(state.faq.current().items.is_empty());
    assert_eq!(state.faq.revision(), 0);
    assert!(store.get(FAQ_SETTINGS_KEY).await.unwrap().is_none());
    assert_eq!(editor.list().expanded_id(), None);
}

#[tokio::test]
async fn add_with_commits_once() {
    let (state, _) = memory_state();
    let mut editor = state.faq_editor();

    let id = editor
        .add_with(vec![
            ("question".to_string(), "Why?".into()),
            ("enabled".to_string(), FieldValue::Flag(false)),
        ])
        .await
        .unwrap();

    let items = &state.faq.current().items;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, id);
    assert_eq!(items[0].question, "Why?");
    assert!(!items[0].enabled);
    assert_eq!(state.faq.revision(), 1);
    assert!(editor.list().is_expanded(&id));
}

#[tokio::test]
async fn concurrent_editors_do_not_lose_adds() {
    let (state, _) = memory_state();
    let state = Arc::new(state);

    let handles: Vec<_> = (0..6)
        .map(|_| {
            let state = Arc::clone(&state);
            tokio::spawn(async move {
                let mut editor = state.homepage_editor(HomepageSettings::STATS);
                editor.add().await
            })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let stats = &state.homepage.current().stats.items;
    assert_eq!(stats.len(), 6);
    let mut orders: Vec<u32> = stats.iter().map(|s| s.order).collect();
    orders.sort_unstable();
    assert_eq!(orders, vec![1, 2, 3, 4, 5, 6]);
}

#[tokio::test]
async fn quota_failure_is_reported_and_retryable() {
    let store = Arc::new(InMemoryKeyValueStore::with_quota(600));
    let state = AppStateBuilder::new()
        .key_value_store(store.clone())
        .build()
        .unwrap();
    let mut editor = state.faq_editor();
    let id = editor.add().await.unwrap();

    let long_answer = "x".repeat(1_000);
    let err = editor
        .update_field(&id, "answer", long_answer.clone().into())
        .await
        .unwrap_err();

    assert!(matches!(err, CoreError::QuotaExceeded { .. }));
    assert!(state.faq.is_dirty());
    assert_eq!(state.faq.current().items[0].answer, long_answer);
    assert!(state.faq.retry_save().await.is_err());
}

// ===== Galleries =====

#[tokio::test]
async fn gallery_documents_are_cached_per_product() {
    let (state, _) = memory_state();

    let a = state.gallery("p1").await;
    let b = state.gallery("p1").await;
    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(a.current().product_id, "p1");

    let mut editor = state.gallery_editor("p1").await;
    let image = editor.add().await.unwrap();
    editor
        .update_field(&image, "isPrimary", FieldValue::Flag(true))
        .await
        .unwrap();

    assert_eq!(a.current().primary_image().map(|i| i.id.clone()), Some(image));
    assert_eq!(state.gallery_ids().await.unwrap(), vec!["p1".to_string()]);
}

// ===== Config-driven bootstrap =====

#[tokio::test]
async fn json_backend_persists_across_restarts() {
    let tmp = tempfile::tempdir().expect("failed to create temp dir");
    let config = json_config(&tmp);

    {
        let state = AppState::from_config(&config).await.unwrap();
        let mut editor = state.homepage_editor(HomepageSettings::LOGOS);
        let id = editor.add().await.unwrap();
        editor
            .update_field(&id, "name", "Acme".into())
            .await
            .unwrap();
    }

    let state = AppState::from_config(&config).await.unwrap();
    let logos = &state.homepage.current().clients.logos;
    assert_eq!(logos.len(), 1);
    assert_eq!(logos[0].name, "Acme");
    assert!(tmp.path().join("settings.json").exists());
}

#[tokio::test]
async fn config_file_round_trip() {
    let tmp = tempfile::tempdir().expect("failed to create temp dir");
    let path = tmp.path().join("config.json");

    assert_eq!(AppConfig::load(&path).unwrap(), AppConfig::default());

    let config = AppConfig {
        backend: StorageBackend::Memory,
        storage_quota_bytes: Some(4096),
        ..json_config(&tmp)
    };
    config.save(&path).unwrap();
    assert_eq!(AppConfig::load(&path).unwrap(), config);

    std::fs::write(&path, "not json").unwrap();
    assert!(matches!(
        AppConfig::load(&path),
        Err(CoreError::SerializationError(_))
    ));
}
