//! Storefront CMS Core Library
//!
//! Content-editing logic for the back office of a storefront site:
//! - Ordered record lists (steps, testimonials, stats, logos, FAQ items, product images)
//! - Settings containers holding those lists plus section toggles
//! - List editor state (expand/collapse, two-phase delete, reordering)
//! - Persistence bridge with change notification
//!
//! This library is platform-independent; durable storage is abstracted through the
//! `KeyValueStore` trait.

pub mod editor;
pub mod error;
pub mod ordering;
pub mod services;
pub mod traits;
pub mod types;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use editor::{ListEditor, ListRow};
pub use error::{CoreError, CoreResult};
pub use ordering::MoveDirection;
pub use services::{ChangeNotifier, PersistenceService, ServiceContext, SettingsDocument};
pub use traits::{InMemoryKeyValueStore, KeyValueStore};
