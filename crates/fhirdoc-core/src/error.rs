use thiserror::Error;

/// Errors raised while interpreting FHIR input. All of them describe a bad
/// request rather than a server fault.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Unsupported FHIR version: {0}")]
    UnsupportedVersion(String),

    #[error("Resource type {resource_type} is not available in FHIR {version}")]
    SchemaNotFound {
        version: String,
        resource_type: String,
    },

    #[error("Invalid FHIR DateTime: {0}")]
    InvalidDateTime(String),

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Resource type mismatch: expected {expected}, found {found}")]
    ResourceTypeMismatch { expected: String, found: String },

    #[error("Invalid resource data: {message}")]
    InvalidResource { message: String },
}

impl CoreError {
    /// Create a new UnsupportedVersion error
    pub fn unsupported_version(version: impl Into<String>) -> Self {
        Self::UnsupportedVersion(version.into())
    }

    /// Create a new SchemaNotFound error
    pub fn schema_not_found(version: impl Into<String>, resource_type: impl Into<String>) -> Self {
        Self::SchemaNotFound {
            version: version.into(),
            resource_type: resource_type.into(),
        }
    }

    /// Create a new InvalidDateTime error
    pub fn invalid_date_time(datetime: impl Into<String>) -> Self {
        Self::InvalidDateTime(datetime.into())
    }

    /// Create a new ResourceTypeMismatch error
    pub fn resource_type_mismatch(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::ResourceTypeMismatch {
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Create a new InvalidResource error
    pub fn invalid_resource(message: impl Into<String>) -> Self {
        Self::InvalidResource {
            message: message.into(),
        }
    }
}

/// Convenience result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
