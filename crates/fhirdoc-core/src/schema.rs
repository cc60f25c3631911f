use crate::error::{CoreError, Result};
use crate::fhir::FhirVersion;
use crate::resource::{Document, FhirResource, from_document};
use serde_json::Value;
use std::marker::PhantomData;

/// Resource types each supported version can construct.
const SUPPORTED: &[(FhirVersion, &[&str])] = &[
    (FhirVersion::Dstu2, &["Organization", "Observation"]),
    (FhirVersion::Stu3, &["Organization", "Observation"]),
    (FhirVersion::R4, &["Organization", "Observation"]),
];

/// Constructor for one resource type under one FHIR version.
#[derive(Debug, Clone)]
pub struct ResourceSchema<R> {
    version: FhirVersion,
    _marker: PhantomData<fn() -> R>,
}

impl<R: FhirResource> ResourceSchema<R> {
    pub fn version(&self) -> FhirVersion {
        self.version
    }

    pub fn resource_type(&self) -> &'static str {
        R::RESOURCE_TYPE
    }

    /// Empty instance of the resource.
    pub fn instantiate(&self) -> R {
        R::default()
    }

    /// Builds the resource from arbitrary JSON, typically a request body.
    pub fn construct(&self, value: Value) -> Result<R> {
        match value {
            Value::Object(map) => from_document(map),
            Value::Null => Ok(R::default()),
            other => Err(CoreError::invalid_resource(format!(
                "{} must be a JSON object, got {other}",
                R::RESOURCE_TYPE
            ))),
        }
    }

    /// Builds the resource from a stored document.
    pub fn from_document(&self, document: Document) -> Result<R> {
        from_document(document)
    }
}

/// Looks up the constructor for `R` under `version`.
pub fn resolve_schema<R: FhirResource>(version: FhirVersion) -> Result<ResourceSchema<R>> {
    let known = SUPPORTED
        .iter()
        .find(|(v, _)| *v == version)
        .map(|(_, types)| types.contains(&R::RESOURCE_TYPE))
        .unwrap_or(false);

    if !known {
        return Err(CoreError::schema_not_found(
            version.as_base_version(),
            R::RESOURCE_TYPE,
        ));
    }

    Ok(ResourceSchema {
        version,
        _marker: PhantomData,
    })
}
