//! Platform-agnostic application bootstrap for the Storefront CMS back office.
//!
//! Provides `AppState` (shared documents and services), `AppStateBuilder` (adapter
//! injection), `AppConfig` (config file) and `SectionEditor` (a list editor bound to a
//! persisted document).

pub mod adapters;
pub mod config;
pub mod editor;

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::RwLock;

use storefront_cms_core::error::{CoreError, CoreResult};
use storefront_cms_core::services::{
    ChangeNotifier, PersistenceService, ServiceContext, SettingsDocument,
};
use storefront_cms_core::traits::{InMemoryKeyValueStore, KeyValueStore};
use storefront_cms_core::types::{
    product_gallery_key, FaqItem, FaqSettings, HomepageSettings, ListBinding, OrderedRecord,
    ProductGallery, ProductImage, FAQ_SETTINGS_KEY, HOMEPAGE_SETTINGS_KEY,
    PRODUCT_GALLERY_KEY_PREFIX,
};

pub use config::{AppConfig, StorageBackend};
pub use editor::SectionEditor;

type GalleryMap = HashMap<String, Arc<SettingsDocument<ProductGallery>>>;

/// Platform-agnostic application state.
///
/// Holds the `ServiceContext` and one `SettingsDocument` per settings key. Every editor of
/// a key shares the same document. Frontends construct this once at startup via
/// `AppStateBuilder` (or `from_config`) and then call `run_startup`.
pub struct AppState {
    /// Service context (store + notifier)
    pub ctx: Arc<ServiceContext>,
    /// Persistence bridge
    pub persistence: Arc<PersistenceService>,
    /// `homepageSettings`
    pub homepage: Arc<SettingsDocument<HomepageSettings>>,
    /// `faqSettings`
    pub faq: Arc<SettingsDocument<FaqSettings>>,
    /// `productGallery:<id>`, opened on first use
    galleries: RwLock<GalleryMap>,
    /// Whether the startup load has completed
    pub startup_completed: AtomicBool,
}

impl AppState {
    /// Build from a config file: pick the store adapter, then run startup.
    ///
    /// # Errors
    /// Returns `CoreError::ValidationError` for a backend this build does not include, or
    /// the adapter's error if the store cannot be opened.
    pub async fn from_config(config: &AppConfig) -> CoreResult<Self> {
        let store: Arc<dyn KeyValueStore> = match config.backend {
            StorageBackend::Memory => {
                let store = match config.storage_quota_bytes {
                    Some(bytes) => InMemoryKeyValueStore::with_quota(bytes),
                    None => InMemoryKeyValueStore::new(),
                };
                Arc::new(store)
            }
            StorageBackend::JsonFile => {
                let mut store = adapters::JsonFileStore::new(config.store_path()?);
                if let Some(bytes) = config.storage_quota_bytes {
                    store = store.with_quota(bytes);
                }
                Arc::new(store)
            }
            StorageBackend::Sqlite => open_sqlite(config).await?,
        };
        log::info!("Using {:?} settings store", config.backend);

        let state = AppStateBuilder::new()
            .key_value_store(store)
            .notify_capacity(config.notify_capacity)
            .build()?;
        state.run_startup().await?;
        Ok(state)
    }

    /// Load every fixed document from the store.
    ///
    /// Missing keys keep their defaults; a malformed stored value is logged and the
    /// default is kept. Sets `startup_completed` when done.
    pub async fn run_startup(&self) -> CoreResult<()> {
        match self.homepage.reload().await {
            Ok(changed) => log::info!("Loaded homepage settings (stored: {changed})"),
            Err(e) => log::warn!("Keeping default homepage settings: {e}"),
        }
        match self.faq.reload().await {
            Ok(changed) => log::info!("Loaded FAQ settings (stored: {changed})"),
            Err(e) => log::warn!("Keeping default FAQ settings: {e}"),
        }
        self.startup_completed.store(true, Ordering::SeqCst);
        Ok(())
    }

    /// Document for one product's image gallery, opened and cached on first use
    pub async fn gallery(&self, product_id: &str) -> Arc<SettingsDocument<ProductGallery>> {
        {
            let galleries = self.galleries.read().await;
            if let Some(doc) = galleries.get(product_id) {
                return Arc::clone(doc);
            }
        }

        let mut galleries = self.galleries.write().await;
        if let Some(doc) = galleries.get(product_id) {
            return Arc::clone(doc);
        }

        let key = product_gallery_key(product_id);
        let initial = self
            .persistence
            .load(&key, ProductGallery::new(product_id))
            .await;
        let doc = Arc::new(SettingsDocument::with_value(
            Arc::clone(&self.persistence),
            key,
            initial,
        ));
        galleries.insert(product_id.to_string(), Arc::clone(&doc));
        doc
    }

    /// Product ids that have a stored gallery
    pub async fn gallery_ids(&self) -> CoreResult<Vec<String>> {
        let keys = self.persistence.keys().await?;
        Ok(keys
            .into_iter()
            .filter_map(|key| key.strip_prefix(PRODUCT_GALLERY_KEY_PREFIX).map(String::from))
            .collect())
    }

    pub fn homepage_editor<R: OrderedRecord>(
        &self,
        binding: ListBinding<HomepageSettings, R>,
    ) -> SectionEditor<HomepageSettings, R> {
        SectionEditor::new(Arc::clone(&self.homepage), binding)
    }

    pub fn faq_editor(&self) -> SectionEditor<FaqSettings, FaqItem> {
        SectionEditor::new(Arc::clone(&self.faq), FaqSettings::ITEMS)
    }

    pub async fn gallery_editor(
        &self,
        product_id: &str,
    ) -> SectionEditor<ProductGallery, ProductImage> {
        SectionEditor::new(self.gallery(product_id).await, ProductGallery::IMAGES)
    }
}

#[cfg(feature = "sqlite-store")]
async fn open_sqlite(config: &AppConfig) -> CoreResult<Arc<dyn KeyValueStore>> {
    let store = adapters::SqliteStore::new(&config.database_path()?).await?;
    Ok(Arc::new(store))
}

#[cfg(not(feature = "sqlite-store"))]
async fn open_sqlite(_config: &AppConfig) -> CoreResult<Arc<dyn KeyValueStore>> {
    Err(CoreError::ValidationError(
        "sqlite backend requires the sqlite-store feature".to_string(),
    ))
}

/// Builder for constructing `AppState` with a platform-specific store.
///
/// # Required adapters
/// - `key_value_store` — where settings documents are persisted
///
/// # Optional
/// - `notify_capacity` — buffered change events per subscriber, defaults to
///   `ChangeNotifier::DEFAULT_CAPACITY`
pub struct AppStateBuilder {
    key_value_store: Option<Arc<dyn KeyValueStore>>,
    notify_capacity: usize,
}

impl AppStateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            key_value_store: None,
            notify_capacity: ChangeNotifier::DEFAULT_CAPACITY,
        }
    }

    #[must_use]
    pub fn key_value_store(mut self, store: Arc<dyn KeyValueStore>) -> Self {
        self.key_value_store = Some(store);
        self
    }

    #[must_use]
    pub fn notify_capacity(mut self, capacity: usize) -> Self {
        self.notify_capacity = capacity;
        self
    }

    /// Build the `AppState`.
    ///
    /// Documents start at their defaults; call `AppState::run_startup` to load them.
    ///
    /// # Errors
    /// Returns `CoreError::ValidationError` if required adapters are missing.
    pub fn build(self) -> CoreResult<AppState> {
        let key_value_store = self.key_value_store.ok_or_else(|| {
            CoreError::ValidationError("key_value_store is required".to_string())
        })?;

        let ctx = Arc::new(ServiceContext::new(
            key_value_store,
            ChangeNotifier::new(self.notify_capacity),
        ));
        let persistence = Arc::new(PersistenceService::new(Arc::clone(&ctx)));

        let homepage = Arc::new(SettingsDocument::with_value(
            Arc::clone(&persistence),
            HOMEPAGE_SETTINGS_KEY,
            HomepageSettings::default(),
        ));
        let faq = Arc::new(SettingsDocument::with_value(
            Arc::clone(&persistence),
            FAQ_SETTINGS_KEY,
            FaqSettings::default(),
        ));

        Ok(AppState {
            ctx,
            persistence,
            homepage,
            faq,
            galleries: RwLock::new(HashMap::new()),
            startup_completed: AtomicBool::new(false),
        })
    }
}

impl Default for AppStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
