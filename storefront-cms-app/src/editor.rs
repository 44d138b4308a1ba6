//! A list editor bound to a persisted settings document

use std::sync::Arc;

use storefront_cms_core::error::{CoreError, CoreResult};
use storefront_cms_core::services::SettingsDocument;
use storefront_cms_core::types::{
    FieldValue, ListBinding, OrderedRecord, SectionToggle, SettingsContainer,
};
use storefront_cms_core::{ListEditor, ListRow, MoveDirection};

/// Edits one record list of a shared `SettingsDocument`
///
/// Every operation runs inside `SettingsDocument::update`: the list operation is applied to
/// the latest snapshot and the whole container is committed under the document's write lock.
/// Operations that leave the container unchanged (boundary moves, unknown ids) do not write.
pub struct SectionEditor<S: SettingsContainer, R: OrderedRecord> {
    document: Arc<SettingsDocument<S>>,
    list: ListEditor<S, R>,
}

impl<S: SettingsContainer, R: OrderedRecord> SectionEditor<S, R> {
    #[must_use]
    pub fn new(document: Arc<SettingsDocument<S>>, binding: ListBinding<S, R>) -> Self {
        Self {
            document,
            list: ListEditor::new(binding),
        }
    }

    pub fn document(&self) -> &Arc<SettingsDocument<S>> {
        &self.document
    }

    pub fn list(&self) -> &ListEditor<S, R> {
        &self.list
    }

    pub fn rows(&self) -> Vec<ListRow> {
        self.list.rows(&self.document.current())
    }

    pub fn records(&self) -> Vec<R> {
        self.list.sorted(&self.document.current())
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty(&self.document.current())
    }

    pub fn toggle(&mut self, id: &str) {
        self.list.toggle(id);
    }

    /// Add a record with defaults; returns its id
    pub async fn add(&mut self) -> CoreResult<String> {
        self.add_with(Vec::new()).await
    }

    /// Add a record and fill in `fields` before anything is committed
    ///
    /// If any assignment is rejected the document is left untouched.
    pub async fn add_with(&mut self, fields: Vec<(String, FieldValue)>) -> CoreResult<String> {
        let list = &mut self.list;
        let mut new_id = None;
        let result = self
            .document
            .update(|current| {
                let (mut next, id) = list.add(current);
                for (field, value) in fields {
                    next = list.update_field(&next, &id, &field, value)?;
                }
                new_id = Some(id);
                Ok(next)
            })
            .await;

        let Some(id) = new_id else {
            // the record was never created
            self.list.collapse();
            return Err(result.err().unwrap_or_else(|| {
                CoreError::ValidationError("record was not created".to_string())
            }));
        };
        result.map(|_| id)
    }

    pub async fn update_field(&mut self, id: &str, field: &str, value: FieldValue) -> CoreResult<()> {
        let list = &self.list;
        self.document
            .update(|current| list.update_field(current, id, field, value))
            .await?;
        Ok(())
    }

    pub async fn update_with<F>(&mut self, id: &str, f: F) -> CoreResult<()>
    where
        F: FnOnce(&mut R),
    {
        let list = &self.list;
        self.document
            .update(|current| Ok(list.update_with(current, id, f)))
            .await?;
        Ok(())
    }

    pub async fn move_item(&mut self, index: usize, direction: MoveDirection) -> CoreResult<()> {
        let list = &self.list;
        self.document
            .update(|current| Ok(list.move_item(current, index, direction)))
            .await?;
        Ok(())
    }

    pub async fn move_by_id(&mut self, id: &str, direction: MoveDirection) -> CoreResult<()> {
        let list = &self.list;
        self.document
            .update(|current| Ok(list.move_by_id(current, id, direction)))
            .await?;
        Ok(())
    }

    pub fn request_delete(&mut self, id: &str) -> bool {
        self.list.request_delete(&self.document.current(), id)
    }

    pub fn cancel_delete(&mut self) {
        self.list.cancel_delete();
    }

    pub async fn confirm_delete(&mut self, id: &str) -> CoreResult<()> {
        let list = &mut self.list;
        self.document
            .update(|current| list.confirm_delete(current, id))
            .await?;
        Ok(())
    }

    /// Flip a section's visibility gate on the same document
    ///
    /// Returns whether the gate actually changed.
    pub async fn set_enabled(&self, toggle: SectionToggle<S>, enabled: bool) -> CoreResult<bool> {
        self.document
            .update(|current| Ok(toggle.set(current, enabled)))
            .await
    }
}
