//! Storage adapters for non-browser frontends (CLI, services).

mod json_file_store;

pub use json_file_store::JsonFileStore;

#[cfg(feature = "sqlite-store")]
mod sqlite;

#[cfg(feature = "sqlite-store")]
pub use sqlite::SqliteStore;
