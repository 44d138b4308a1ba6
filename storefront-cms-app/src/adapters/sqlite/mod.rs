//! SQLite-based settings store using `SeaORM`.
//!
//! One row per settings key in `settings_entries`.

mod entity;
mod migration;

use std::path::Path;

use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveValue::Set, Database, DatabaseConnection, EntityTrait, QueryOrder, QuerySelect,
};
use sea_orm_migration::MigratorTrait;

use storefront_cms_core::error::{CoreError, CoreResult};
use storefront_cms_core::traits::KeyValueStore;

use entity::settings_entry;
use migration::Migrator;

/// `KeyValueStore` backed by a local `SQLite` database file.
pub struct SqliteStore {
    db: DatabaseConnection,
}

impl SqliteStore {
    /// Open (or create) the database at `db_path` and bring the schema up to date.
    ///
    /// # Errors
    /// Returns `CoreError::StorageError` if directory creation, database
    /// connection, or schema migration fails.
    pub async fn new(db_path: &Path) -> CoreResult<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| CoreError::StorageError(format!("Failed to create directory: {e}")))?;
        }

        let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
        let db = Database::connect(&db_url)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to connect to SQLite: {e}")))?;

        Migrator::up(&db, None)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to run migrations: {e}")))?;

        Ok(Self { db })
    }
}

#[async_trait]
impl KeyValueStore for SqliteStore {
    async fn get(&self, key: &str) -> CoreResult<Option<String>> {
        let row = settings_entry::Entity::find_by_id(key)
            .one(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to query '{key}': {e}")))?;

        Ok(row.map(|r| r.value))
    }

    async fn set(&self, key: &str, value: &str) -> CoreResult<()> {
        let active_model = settings_entry::ActiveModel {
            key: Set(key.to_string()),
            value: Set(value.to_string()),
            updated_at: Set(chrono::Utc::now().to_rfc3339()),
        };

        settings_entry::Entity::insert(active_model)
            .on_conflict(
                OnConflict::column(settings_entry::Column::Key)
                    .update_columns([
                        settings_entry::Column::Value,
                        settings_entry::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to save '{key}': {e}")))?;

        Ok(())
    }

    async fn remove(&self, key: &str) -> CoreResult<()> {
        settings_entry::Entity::delete_by_id(key)
            .exec(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to delete '{key}': {e}")))?;
        Ok(())
    }

    async fn keys(&self) -> CoreResult<Vec<String>> {
        settings_entry::Entity::find()
            .select_only()
            .column(settings_entry::Column::Key)
            .order_by_asc(settings_entry::Column::Key)
            .into_tuple::<String>()
            .all(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to list keys: {e}")))
    }
}
