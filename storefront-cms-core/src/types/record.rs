//! Ordered record abstraction shared by every editable list

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// A single field value coming from an edit form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Text input, textarea, select
    Text(String),
    /// Checkbox / toggle
    Flag(bool),
}

impl FieldValue {
    /// Parse a raw form/CLI string: `true`/`false` become flags, everything else is text
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw {
            "true" => Self::Flag(true),
            "false" => Self::Flag(false),
            other => Self::Text(other.to_string()),
        }
    }

    /// Extract text for a text field
    ///
    /// A flag is rendered as `true`/`false`; a title reading "true" is still a title.
    #[must_use]
    pub fn into_text(self) -> String {
        match self {
            Self::Text(s) => s,
            Self::Flag(b) => b.to_string(),
        }
    }

    /// Extract a boolean for a toggle field
    pub fn into_flag(self, field: &str) -> CoreResult<bool> {
        match self {
            Self::Flag(b) => Ok(b),
            Self::Text(_) => Err(CoreError::FieldTypeMismatch {
                field: field.to_string(),
                expected: "flag",
            }),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Flag(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        Self::Flag(b)
    }
}

/// Record Trait
///
/// Every entry of an ordered, user-editable list (steps, testimonials, FAQ items, ...).
///
/// - `id` is assigned once at creation and never changes
/// - `order` defines the display sequence and may contain gaps until the list is renormalized
pub trait OrderedRecord: Clone + fmt::Debug + PartialEq + Send + Sync + 'static {
    /// Short kind name used in messages (`step`, `faqItem`, ...)
    fn kind() -> &'static str;

    /// Build a record with default domain fields
    fn create(id: String, order: u32) -> Self;

    fn id(&self) -> &str;

    fn order(&self) -> u32;

    fn set_order(&mut self, order: u32);

    /// Names accepted by `field` / `set_field`
    fn field_names() -> &'static [&'static str];

    /// Read a domain field by name
    fn field(&self, name: &str) -> Option<FieldValue>;

    /// Write a domain field by name
    ///
    /// `id` and `order` are not writable through this path.
    fn set_field(&mut self, name: &str, value: FieldValue) -> CoreResult<()>;

    /// Header text shown for the collapsed item
    fn label(&self) -> String;
}

/// Shared `UnknownField` constructor for `set_field` implementations
pub(crate) fn unknown_field<R: OrderedRecord>(name: &str) -> CoreError {
    CoreError::UnknownField {
        kind: R::kind().to_string(),
        field: name.to_string(),
    }
}
