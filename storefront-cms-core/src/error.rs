//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// The record kind has no field with this name
    #[error("Unknown field '{field}' on {kind}")]
    UnknownField { kind: String, field: String },

    /// A text field was given a flag, or a flag field was given text
    #[error("Field '{field}' expects a {expected} value")]
    FieldTypeMismatch {
        field: String,
        expected: &'static str,
    },

    /// `confirm_delete` was called without a matching `request_delete`
    #[error("Delete was not requested for record: {0}")]
    DeleteNotRequested(String),

    /// No settings document is registered under this key
    #[error("Settings document not found: {0}")]
    DocumentNotFound(String),

    /// Storage quota would be exceeded by a write
    #[error("Storage quota exceeded while writing '{key}' (limit {limit} bytes)")]
    QuotaExceeded { key: String, limit: usize },

    /// serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Storage layer error
    #[error("Storage error: {0}")]
    StorageError(String),

    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl CoreError {
    /// Whether it is expected behavior (user input, resource does not exist, etc.) is used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    /// **Please update this method simultaneously when new variants are added. **
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::UnknownField { .. }
            | Self::FieldTypeMismatch { .. }
            | Self::DeleteNotRequested(_)
            | Self::DocumentNotFound(_)
            | Self::ValidationError(_) => true,
            Self::QuotaExceeded { .. } | Self::SerializationError(_) | Self::StorageError(_) => {
                false
            }
        }
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        Self::SerializationError(e.to_string())
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_errors_are_expected() {
        let err = CoreError::UnknownField {
            kind: "step".to_string(),
            field: "colour".to_string(),
        };
        assert!(err.is_expected());
        assert!(CoreError::DeleteNotRequested("a".to_string()).is_expected());
    }

    #[test]
    fn storage_errors_are_not_expected() {
        let err = CoreError::QuotaExceeded {
            key: "homepageSettings".to_string(),
            limit: 10,
        };
        assert!(!err.is_expected());
        assert!(!CoreError::StorageError("disk".to_string()).is_expected());
    }

    #[test]
    fn serializes_with_code_tag() {
        let err = CoreError::DocumentNotFound("faqSettings".to_string());
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "DocumentNotFound");
        assert_eq!(json["details"], "faqSettings");
    }
}
