//! Storage error types for the document store abstraction.

use std::fmt;

/// Errors that can occur during document store operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A document with the same primary key already exists.
    #[error("Duplicate key in {collection}: _id {key}")]
    DuplicateKey {
        /// Collection the write targeted.
        collection: String,
        /// The conflicting primary key, rendered as JSON.
        key: String,
    },

    /// A replacement tried to change an immutable field.
    #[error("Field '{field}' is immutable in {collection}")]
    ImmutableField {
        /// Collection the write targeted.
        collection: String,
        /// Name of the field.
        field: String,
    },

    /// The document could not be stored or read back.
    #[error("Invalid document: {message}")]
    InvalidDocument {
        /// Description of why the document is invalid.
        message: String,
    },

    /// The filter could not be evaluated or translated.
    #[error("Invalid filter: {message}")]
    InvalidFilter {
        /// Description of why the filter is invalid.
        message: String,
    },

    /// Failed to connect to the storage backend.
    #[error("Connection error: {message}")]
    ConnectionError {
        /// Description of the connection error.
        message: String,
    },

    /// The backend driver reported an error.
    #[error("Backend error: {message}")]
    Backend {
        /// Code reported by the driver, if any.
        code: Option<i32>,
        /// Driver message.
        message: String,
    },

    /// An internal storage error occurred.
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error.
        message: String,
    },
}

impl StorageError {
    /// Creates a new `DuplicateKey` error.
    #[must_use]
    pub fn duplicate_key(collection: impl Into<String>, key: impl Into<String>) -> Self {
        Self::DuplicateKey {
            collection: collection.into(),
            key: key.into(),
        }
    }

    /// Creates a new `ImmutableField` error.
    #[must_use]
    pub fn immutable_field(collection: impl Into<String>, field: impl Into<String>) -> Self {
        Self::ImmutableField {
            collection: collection.into(),
            field: field.into(),
        }
    }

    /// Creates a new `InvalidDocument` error.
    #[must_use]
    pub fn invalid_document(message: impl Into<String>) -> Self {
        Self::InvalidDocument {
            message: message.into(),
        }
    }

    /// Creates a new `InvalidFilter` error.
    #[must_use]
    pub fn invalid_filter(message: impl Into<String>) -> Self {
        Self::InvalidFilter {
            message: message.into(),
        }
    }

    /// Creates a new `ConnectionError` error.
    #[must_use]
    pub fn connection_error(message: impl Into<String>) -> Self {
        Self::ConnectionError {
            message: message.into(),
        }
    }

    /// Creates a new `Backend` error.
    #[must_use]
    pub fn backend(code: Option<i32>, message: impl Into<String>) -> Self {
        Self::Backend {
            code,
            message: message.into(),
        }
    }

    /// Creates a new `Internal` error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns `true` if this is a duplicate key error.
    #[must_use]
    pub fn is_duplicate_key(&self) -> bool {
        matches!(self, Self::DuplicateKey { .. })
    }

    /// Returns `true` if this is a connection error.
    #[must_use]
    pub fn is_connection_error(&self) -> bool {
        matches!(self, Self::ConnectionError { .. })
    }

    /// Returns the error category for logging/monitoring purposes.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::DuplicateKey { .. } | Self::ImmutableField { .. } => ErrorCategory::Conflict,
            Self::InvalidDocument { .. } | Self::InvalidFilter { .. } => ErrorCategory::Validation,
            Self::ConnectionError { .. } | Self::Backend { .. } => ErrorCategory::Infrastructure,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }
}

/// Categories of storage errors for logging and monitoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Write conflicts with stored state.
    Conflict,
    /// Validation error.
    Validation,
    /// Infrastructure/connection error.
    Infrastructure,
    /// Internal error.
    Internal,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Conflict => write!(f, "conflict"),
            Self::Validation => write!(f, "validation"),
            Self::Infrastructure => write!(f, "infrastructure"),
            Self::Internal => write!(f, "internal"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StorageError::duplicate_key("Organization", "\"42\"");
        assert_eq!(err.to_string(), "Duplicate key in Organization: _id \"42\"");

        let err = StorageError::immutable_field("Organization", "_id");
        assert_eq!(err.to_string(), "Field '_id' is immutable in Organization");

        let err = StorageError::backend(Some(13), "not authorized");
        assert_eq!(err.to_string(), "Backend error: not authorized");
    }

    #[test]
    fn test_error_predicates() {
        let err = StorageError::duplicate_key("Organization", "1");
        assert!(err.is_duplicate_key());
        assert!(!err.is_connection_error());

        let err = StorageError::connection_error("refused");
        assert!(err.is_connection_error());
        assert!(!err.is_duplicate_key());
    }

    #[test]
    fn test_error_category() {
        assert_eq!(
            StorageError::duplicate_key("c", "1").category(),
            ErrorCategory::Conflict
        );
        assert_eq!(
            StorageError::immutable_field("c", "_id").category(),
            ErrorCategory::Conflict
        );
        assert_eq!(
            StorageError::invalid_filter("bad regex").category(),
            ErrorCategory::Validation
        );
        assert_eq!(
            StorageError::backend(None, "boom").category(),
            ErrorCategory::Infrastructure
        );
        assert_eq!(
            StorageError::internal("poisoned").category(),
            ErrorCategory::Internal
        );
        assert_eq!(ErrorCategory::Infrastructure.to_string(), "infrastructure");
    }
}
