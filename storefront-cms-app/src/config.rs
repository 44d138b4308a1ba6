//! Application configuration file

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use storefront_cms_core::error::{CoreError, CoreResult};

const APP_DIR_NAME: &str = "storefront-cms";
const CONFIG_FILE_NAME: &str = "config.json";

/// Which `KeyValueStore` adapter backs the settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StorageBackend {
    /// Process-local, lost on exit
    Memory,
    /// One JSON object file in the data directory
    #[default]
    JsonFile,
    /// `SQLite` database in the data directory (`sqlite-store` feature)
    Sqlite,
}

impl std::str::FromStr for StorageBackend {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "memory" => Ok(Self::Memory),
            "jsonFile" | "json-file" | "json" => Ok(Self::JsonFile),
            "sqlite" => Ok(Self::Sqlite),
            other => Err(CoreError::ValidationError(format!(
                "Unknown storage backend: {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    /// Where store files live; platform data dir when unset
    pub data_dir: Option<PathBuf>,
    pub backend: StorageBackend,
    pub store_file_name: String,
    pub database_file_name: String,
    /// Buffered change events per subscriber
    pub notify_capacity: usize,
    /// Byte limit for the memory and JSON backends
    pub storage_quota_bytes: Option<usize>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            backend: StorageBackend::default(),
            store_file_name: "settings.json".to_string(),
            database_file_name: "storefront-cms.db".to_string(),
            notify_capacity: 64,
            storage_quota_bytes: None,
        }
    }
}

impl AppConfig {
    /// `<config dir>/storefront-cms/config.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Read a config file; a missing file is the default config
    ///
    /// # Errors
    /// `StorageError` if the file cannot be read, `SerializationError` if it is not valid.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No config at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(CoreError::StorageError(format!(
                    "Failed to read {}: {e}",
                    path.display()
                )))
            }
        };

        serde_json::from_str(&raw).map_err(|e| {
            CoreError::SerializationError(format!("Invalid config {}: {e}", path.display()))
        })
    }

    /// `load` from `default_path()`, or defaults when there is no config dir
    pub fn load_default() -> CoreResult<Self> {
        match Self::default_path() {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn save(&self, path: &Path) -> CoreResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| CoreError::StorageError(format!("Failed to create directory: {e}")))?;
        }
        let raw = serde_json::to_string_pretty(self)?;
        std::fs::write(path, raw)
            .map_err(|e| CoreError::StorageError(format!("Failed to write {}: {e}", path.display())))
    }

    /// Configured data dir, else `<data dir>/storefront-cms`
    pub fn resolved_data_dir(&self) -> CoreResult<PathBuf> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .ok_or_else(|| {
                CoreError::ValidationError(
                    "No data directory configured and no platform default available".to_string(),
                )
            })
    }

    pub fn store_path(&self) -> CoreResult<PathBuf> {
        Ok(self.resolved_data_dir()?.join(&self.store_file_name))
    }

    pub fn database_path(&self) -> CoreResult<PathBuf> {
        Ok(self.resolved_data_dir()?.join(&self.database_file_name))
    }
}
