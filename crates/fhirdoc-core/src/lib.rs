pub mod error;
pub mod fhir;
pub mod id;
pub mod resource;
pub mod schema;
pub mod time;

pub use error::{CoreError, Result};
pub use fhir::FhirVersion;
pub use id::{generate_id, id_or_generate};
pub use resource::{
    Document, FhirResource, Meta, Observation, Organization, STORAGE_KEY, from_document,
    to_document,
};
pub use schema::{ResourceSchema, resolve_schema};
pub use time::{FhirDateTime, now_utc};
