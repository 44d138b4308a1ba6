//! List editor state
//!
//! UI-side state for editing one record list of a settings container. The editor owns only
//! which item is expanded and which delete is awaiting confirmation; the records themselves
//! belong to the container and every operation returns the next container for the caller
//! to hand to `on_change`.

use serde::Serialize;

use crate::error::{CoreError, CoreResult};
use crate::ordering::{self, MoveDirection};
use crate::types::{FieldValue, ListBinding, OrderedRecord, SettingsContainer};

/// One line of the rendered list, in display order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListRow {
    pub id: String,
    pub order: u32,
    /// Position in display order (what `move_item` takes)
    pub index: usize,
    pub label: String,
    pub expanded: bool,
    pub can_move_up: bool,
    pub can_move_down: bool,
    pub pending_delete: bool,
}

/// Editor for one record list
pub struct ListEditor<S, R> {
    binding: ListBinding<S, R>,
    expanded_id: Option<String>,
    pending_delete: Option<String>,
}

impl<S, R> ListEditor<S, R>
where
    S: SettingsContainer,
    R: OrderedRecord,
{
    #[must_use]
    pub fn new(binding: ListBinding<S, R>) -> Self {
        Self {
            binding,
            expanded_id: None,
            pending_delete: None,
        }
    }

    pub fn binding(&self) -> ListBinding<S, R> {
        self.binding
    }

    pub fn expanded_id(&self) -> Option<&str> {
        self.expanded_id.as_deref()
    }

    pub fn pending_delete(&self) -> Option<&str> {
        self.pending_delete.as_deref()
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded_id.as_deref() == Some(id)
    }

    /// Header click: expand `id`, or collapse it if it is already expanded
    ///
    /// Expanding one item collapses any other.
    pub fn toggle(&mut self, id: &str) {
        if self.is_expanded(id) {
            self.expanded_id = None;
        } else {
            self.expanded_id = Some(id.to_string());
        }
    }

    pub fn collapse(&mut self) {
        self.expanded_id = None;
    }

    pub fn records<'a>(&self, settings: &'a S) -> &'a [R] {
        self.binding.records(settings)
    }

    /// Records in display order
    pub fn sorted(&self, settings: &S) -> Vec<R> {
        ordering::sorted(self.records(settings))
    }

    /// An empty list is a valid state; the view renders its empty placeholder
    pub fn is_empty(&self, settings: &S) -> bool {
        self.records(settings).is_empty()
    }

    /// View model for rendering
    pub fn rows(&self, settings: &S) -> Vec<ListRow> {
        let sorted = self.sorted(settings);
        let len = sorted.len();
        sorted
            .iter()
            .enumerate()
            .map(|(index, record)| ListRow {
                id: record.id().to_string(),
                order: record.order(),
                index,
                label: record.label(),
                expanded: self.is_expanded(record.id()),
                can_move_up: index > 0,
                can_move_down: index + 1 < len,
                pending_delete: self.pending_delete.as_deref() == Some(record.id()),
            })
            .collect()
    }

    /// Append a record with defaults and expand it; returns the new id alongside
    pub fn add(&mut self, settings: &S) -> (S, String) {
        let (records, id) = ordering::add(self.records(settings));
        self.expanded_id = Some(id.clone());
        (self.binding.replace(settings, records), id)
    }

    /// Form input on the expanded item
    pub fn update_field(
        &self,
        settings: &S,
        id: &str,
        field: &str,
        value: FieldValue,
    ) -> CoreResult<S> {
        let records = ordering::update_field(self.records(settings), id, field, value)?;
        Ok(self.binding.replace(settings, records))
    }

    pub fn update_with<F>(&self, settings: &S, id: &str, f: F) -> S
    where
        F: FnOnce(&mut R),
    {
        let records = ordering::update_with(self.records(settings), id, f);
        self.binding.replace(settings, records)
    }

    /// Up/down button on the row at display position `index`
    pub fn move_item(&self, settings: &S, index: usize, direction: MoveDirection) -> S {
        let records = ordering::move_record(self.records(settings), index, direction);
        self.binding.replace(settings, records)
    }

    /// `move_item` addressed by id; unknown ids leave the list unchanged
    pub fn move_by_id(&self, settings: &S, id: &str, direction: MoveDirection) -> S {
        match ordering::display_index(self.records(settings), id) {
            Some(index) => self.move_item(settings, index, direction),
            None => settings.clone(),
        }
    }

    /// First phase of delete: mark `id` as awaiting confirmation
    ///
    /// Returns `false` (and marks nothing) if `id` is not in the list.
    pub fn request_delete(&mut self, settings: &S, id: &str) -> bool {
        if ordering::find(self.records(settings), id).is_none() {
            return false;
        }
        self.pending_delete = Some(id.to_string());
        true
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Second phase of delete: remove the record confirmed by the user
    ///
    /// Fails with `DeleteNotRequested` unless `request_delete(id)` came first.
    pub fn confirm_delete(&mut self, settings: &S, id: &str) -> CoreResult<S> {
        if self.pending_delete.as_deref() != Some(id) {
            return Err(CoreError::DeleteNotRequested(id.to_string()));
        }
        self.pending_delete = None;
        if self.is_expanded(id) {
            self.expanded_id = None;
        }
        let records = ordering::delete(self.records(settings), id);
        Ok(self.binding.replace(settings, records))
    }
}
