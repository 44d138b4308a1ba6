//! Ordered record store
//!
//! Pure functions over a list of [`OrderedRecord`]s. Every operation takes the current list
//! by reference and returns a new one; the input is never modified.
//!
//! Ordering rules:
//! - display order is always computed by sorting on `order`, never taken from the `Vec` position
//! - `add` appends with `max(order) + 1`, `delete` leaves gaps
//! - `move_record` renormalizes the whole list to `1..=N`

mod id;

pub use id::new_record_id;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::types::{FieldValue, OrderedRecord};

/// Reorder direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveDirection {
    Up,
    Down,
}

impl FromStr for MoveDirection {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            other => Err(CoreError::ValidationError(format!(
                "Invalid move direction: '{other}'. Must be 'up' or 'down'"
            ))),
        }
    }
}

impl fmt::Display for MoveDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Up => f.write_str("up"),
            Self::Down => f.write_str("down"),
        }
    }
}

/// Copy of the list sorted by `order` (stable for equal values)
pub fn sorted<R: OrderedRecord>(list: &[R]) -> Vec<R> {
    let mut out = list.to_vec();
    out.sort_by_key(R::order);
    out
}

/// `max(order) + 1`, or `1` for an empty list
pub fn next_order<R: OrderedRecord>(list: &[R]) -> u32 {
    list.iter()
        .map(R::order)
        .max()
        .map_or(1, |max| max.saturating_add(1))
}

pub fn find<'a, R: OrderedRecord>(list: &'a [R], id: &str) -> Option<&'a R> {
    list.iter().find(|r| r.id() == id)
}

/// Sort by `order`, then reassign `order = position + 1`
pub fn renormalize<R: OrderedRecord>(list: &[R]) -> Vec<R> {
    let mut out = sorted(list);
    for (position, record) in out.iter_mut().enumerate() {
        record.set_order(position_to_order(position));
    }
    out
}

/// Append a record with default fields
///
/// Returns the new list and the id of the created record (so the editor can expand it).
pub fn add<R: OrderedRecord>(list: &[R]) -> (Vec<R>, String) {
    let id = new_record_id();
    let record = R::create(id.clone(), next_order(list));
    let mut out = Vec::with_capacity(list.len() + 1);
    out.extend_from_slice(list);
    out.push(record);
    (out, id)
}

/// Set one named field on the record with `id`
///
/// A missing `id` is a silent no-op. An unknown field name or a wrong value type is an error
/// and leaves nothing changed.
pub fn update_field<R: OrderedRecord>(
    list: &[R],
    id: &str,
    field: &str,
    value: FieldValue,
) -> CoreResult<Vec<R>> {
    let Some(position) = list.iter().position(|r| r.id() == id) else {
        return Ok(list.to_vec());
    };

    let mut record = list[position].clone();
    record.set_field(field, value)?;

    let mut out = list.to_vec();
    out[position] = record;
    Ok(out)
}

/// Typed variant of [`update_field`] for Rust call sites
///
/// The closure must not touch `id`. A missing `id` is a silent no-op.
pub fn update_with<R, F>(list: &[R], id: &str, f: F) -> Vec<R>
where
    R: OrderedRecord,
    F: FnOnce(&mut R),
{
    let mut out = list.to_vec();
    if let Some(record) = out.iter_mut().find(|r| r.id() == id) {
        f(record);
        debug_assert_eq!(record.id(), id, "update_with must not change the record id");
    }
    out
}

/// Remove the record with `id`; remaining `order` values are left as they are
///
/// Confirmation happens before this is called (see `ListEditor::request_delete`).
pub fn delete<R: OrderedRecord>(list: &[R], id: &str) -> Vec<R> {
    list.iter().filter(|r| r.id() != id).cloned().collect()
}

/// Swap the record at `index` (position in display order) with its neighbour
///
/// Out-of-range moves return the input unchanged. A successful move renormalizes every
/// `order` to `1..=N`.
pub fn move_record<R: OrderedRecord>(list: &[R], index: usize, direction: MoveDirection) -> Vec<R> {
    if index >= list.len() {
        return list.to_vec();
    }
    let swap_index = match direction {
        MoveDirection::Up => index.checked_sub(1),
        MoveDirection::Down => index.checked_add(1),
    };
    let Some(swap_index) = swap_index.filter(|&i| i < list.len()) else {
        return list.to_vec();
    };

    let mut out = sorted(list);
    out.swap(index, swap_index);
    for (position, record) in out.iter_mut().enumerate() {
        record.set_order(position_to_order(position));
    }
    out
}

/// Index of `id` in display order
pub fn display_index<R: OrderedRecord>(list: &[R], id: &str) -> Option<usize> {
    sorted(list).iter().position(|r| r.id() == id)
}

fn position_to_order(position: usize) -> u32 {
    u32::try_from(position + 1).unwrap_or(u32::MAX)
}
