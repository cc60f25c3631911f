use fhirdoc_core::CoreError;
use fhirdoc_storage::StorageError;
use thiserror::Error;
use tracing::error;

/// Errors returned by the resource services.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The document store failed; the error is passed through unchanged.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The operation exists but has no implementation yet.
    #[error("{operation} is not implemented: {message}")]
    NotImplemented {
        operation: &'static str,
        message: String,
    },

    /// The operation conflicts with stored state.
    #[error("Conflict ({code}): {message}")]
    Conflict { code: u16, message: String },

    /// A required argument is missing or malformed.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl ServiceError {
    pub fn not_implemented(operation: &'static str, message: impl Into<String>) -> Self {
        Self::NotImplemented {
            operation,
            message: message.into(),
        }
    }

    /// A 409 conflict carrying `message`.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            code: 409,
            message: message.into(),
        }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn is_not_implemented(&self) -> bool {
        matches!(self, Self::NotImplemented { .. })
    }

    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Storage(_))
    }

    /// HTTP status the calling framework should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Storage(_) => 500,
            Self::NotImplemented { .. } => 501,
            Self::Conflict { code, .. } => *code,
            Self::InvalidArgument(_) => 400,
            Self::Core(_) => 400,
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Logs a failed store call and wraps it.
pub(crate) fn storage_failure(
    resource: &'static str,
    operation: &'static str,
    err: StorageError,
) -> ServiceError {
    error!(
        resource,
        operation,
        category = %err.category(),
        error = %err,
        "storage error"
    );
    ServiceError::Storage(err)
}

/// A document read back from `collection` that does not fit the resource
/// model. The request was fine; the stored data is not.
pub(crate) fn undecodable_document(
    resource: &'static str,
    operation: &'static str,
    collection: &str,
    err: CoreError,
) -> ServiceError {
    storage_failure(
        resource,
        operation,
        StorageError::invalid_document(format!("stored document in {collection}: {err}")),
    )
}
