//! Typed FHIR resources and their document form.
//!
//! Resources keep the handful of fields the services read or write as typed
//! members and carry every other element through `extra`, so a document read
//! from storage serializes back out unchanged.

use crate::error::{CoreError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A stored JSON object.
pub type Document = Map<String, Value>;

/// Name of the storage primary key field.
pub const STORAGE_KEY: &str = "_id";

/// Resource metadata maintained by the server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Meta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Meta {
    /// Metadata for the first stored version of a resource.
    pub fn first_version(last_updated: impl Into<String>) -> Self {
        Self {
            version_id: Some("1".to_string()),
            last_updated: Some(last_updated.into()),
            extra: Map::new(),
        }
    }
}

/// Behaviour shared by the typed resources.
pub trait FhirResource: Serialize + DeserializeOwned + Default + Clone + Send + Sync {
    const RESOURCE_TYPE: &'static str;

    fn id(&self) -> Option<&str>;
    fn set_id(&mut self, id: String);
    fn meta(&self) -> Option<&Meta>;
    fn set_meta(&mut self, meta: Meta);
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Organization {
    pub resource_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub identifier: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(rename = "type", skip_serializing_if = "Vec::is_empty")]
    pub kind: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub telecom: Vec<Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub address: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub part_of: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for Organization {
    fn default() -> Self {
        Self {
            resource_type: Self::RESOURCE_TYPE.to_string(),
            id: None,
            meta: None,
            identifier: Vec::new(),
            active: None,
            kind: Vec::new(),
            name: None,
            telecom: Vec::new(),
            address: Vec::new(),
            part_of: None,
            extra: Map::new(),
        }
    }
}

impl FhirResource for Organization {
    const RESOURCE_TYPE: &'static str = "Organization";

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }

    fn meta(&self) -> Option<&Meta> {
        self.meta.as_ref()
    }

    fn set_meta(&mut self, meta: Meta) {
        self.meta = Some(meta);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Observation {
    pub resource_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub identifier: Vec<Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub based_on: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub category: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_date_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_quantity: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_string: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for Observation {
    fn default() -> Self {
        Self {
            resource_type: Self::RESOURCE_TYPE.to_string(),
            id: None,
            meta: None,
            identifier: Vec::new(),
            based_on: Vec::new(),
            status: None,
            category: Vec::new(),
            code: None,
            subject: None,
            effective_date_time: None,
            value_quantity: None,
            value_string: None,
            extra: Map::new(),
        }
    }
}

impl FhirResource for Observation {
    const RESOURCE_TYPE: &'static str = "Observation";

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }

    fn meta(&self) -> Option<&Meta> {
        self.meta.as_ref()
    }

    fn set_meta(&mut self, meta: Meta) {
        self.meta = Some(meta);
    }
}

/// Serializes a resource into its stored document form.
pub fn to_document<R: FhirResource>(resource: &R) -> Result<Document> {
    match serde_json::to_value(resource)? {
        Value::Object(map) => Ok(map),
        other => Err(CoreError::invalid_resource(format!(
            "{} serialized to a non-object value: {other}",
            R::RESOURCE_TYPE
        ))),
    }
}

/// Builds a typed resource from a stored document.
///
/// The storage key is dropped. A document without `resourceType` is
/// accepted; one naming a different type is rejected.
pub fn from_document<R: FhirResource>(mut document: Document) -> Result<R> {
    document.remove(STORAGE_KEY);
    match document.get("resourceType") {
        Some(Value::String(found)) if found != R::RESOURCE_TYPE => {
            return Err(CoreError::resource_type_mismatch(R::RESOURCE_TYPE, found.clone()));
        }
        Some(Value::String(_)) => {}
        Some(other) => {
            return Err(CoreError::invalid_resource(format!(
                "resourceType must be a string, got {other}"
            )));
        }
        None => {
            document.insert(
                "resourceType".to_string(),
                Value::String(R::RESOURCE_TYPE.to_string()),
            );
        }
    }
    Ok(serde_json::from_value(Value::Object(document))?)
}
