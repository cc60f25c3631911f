//! Request arguments handed to the services by the router.

use fhirdoc_core::FhirVersion;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;

use crate::error::{ServiceError, ServiceResult};

/// Flat mapping of parameter name to value.
///
/// Holds search parameters as well as `id`, `version_id`, `base_version`
/// and `resource` for single-resource operations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceArgs {
    values: IndexMap<String, Value>,
}

impl ServiceArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Scalar parameter rendered as a string. Strings come back as-is,
    /// numbers and booleans in their JSON spelling; anything else is `None`.
    pub fn get_str(&self, name: &str) -> Option<String> {
        match self.values.get(name)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    pub fn id(&self) -> Option<String> {
        self.get_str("id")
    }

    /// `id`, or `InvalidArgument` when missing.
    pub fn require_id(&self) -> ServiceResult<String> {
        self.id()
            .ok_or_else(|| ServiceError::invalid_argument("missing required argument 'id'"))
    }

    pub fn version_id(&self) -> Option<String> {
        self.get_str("version_id")
    }

    /// Parsed `base_version`.
    pub fn base_version(&self) -> ServiceResult<FhirVersion> {
        let raw = self.get_str("base_version").ok_or_else(|| {
            ServiceError::invalid_argument("missing required argument 'base_version'")
        })?;
        Ok(FhirVersion::from_str(&raw)?)
    }

    pub fn resource(&self) -> Option<&Value> {
        self.values.get("resource").filter(|v| !v.is_null())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for ServiceArgs {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Inbound request data beyond the parsed arguments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestContext {
    /// Raw request body, when the request had one.
    pub body: Option<Value>,
}

impl RequestContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_body(body: Value) -> Self {
        Self { body: Some(body) }
    }
}
