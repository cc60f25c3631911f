use fhirdoc_core::{Document, Organization, STORAGE_KEY, from_document};
use fhirdoc_storage::{DynCollection, DynStore, Filter, ReplaceOptions};
use serde_json::Value;
use tracing::{error, info};

use crate::ORGANIZATION_COLLECTION;
use crate::args::ServiceArgs;
use crate::error::{ServiceError, ServiceResult, storage_failure, undecodable_document};
use crate::outcome::{CreateOutcome, UpdateOutcome};

const RESOURCE: &str = "Organization";

/// CRUD handlers for Organization, stored in a single unversioned collection.
#[derive(Clone)]
pub struct OrganizationService {
    store: DynStore,
}

impl OrganizationService {
    pub fn new(store: DynStore) -> Self {
        Self { store }
    }

    fn collection(&self) -> DynCollection {
        self.store.collection(ORGANIZATION_COLLECTION)
    }

    /// Number of stored organizations.
    pub async fn get_count(&self, _args: &ServiceArgs) -> ServiceResult<u64> {
        info!(resource = RESOURCE, operation = "get_count", "service call");
        self.collection()
            .count(&Filter::new())
            .await
            .map_err(|e| storage_failure(RESOURCE, "get_count", e))
    }

    /// Organization search. Not implemented.
    pub async fn get_organization(&self, _args: &ServiceArgs) -> ServiceResult<Vec<Organization>> {
        info!(resource = RESOURCE, operation = "get_organization", "service call");
        Err(ServiceError::not_implemented(
            "get_organization",
            "Support coming soon",
        ))
    }

    /// Organization whose domain `id` equals `args.id`, if any.
    pub async fn get_organization_by_id(
        &self,
        args: &ServiceArgs,
    ) -> ServiceResult<Option<Organization>> {
        info!(resource = RESOURCE, operation = "get_organization_by_id", "service call");
        let id = args.require_id()?;

        let found = self
            .collection()
            .find_one(&Filter::eq("id", id))
            .await
            .map_err(|e| storage_failure(RESOURCE, "get_organization_by_id", e))?;

        found
            .map(|document| {
                from_document(document).map_err(|e| {
                    undecodable_document(
                        RESOURCE,
                        "get_organization_by_id",
                        ORGANIZATION_COLLECTION,
                        e,
                    )
                })
            })
            .transpose()
    }

    /// Inserts `args.resource`, keyed by `args.id` when given.
    ///
    /// The returned id is the stored resource's own `id` field.
    pub async fn create_organization(&self, args: &ServiceArgs) -> ServiceResult<CreateOutcome> {
        info!(resource = RESOURCE, operation = "create_organization", "service call");
        let document = keyed_document(args, args.id())?;
        let domain_id = document.get("id").and_then(Value::as_str).map(str::to_string);

        self.collection()
            .insert_one(document)
            .await
            .map_err(|e| storage_failure(RESOURCE, "create_organization", e))?;

        Ok(CreateOutcome {
            id: domain_id,
            resource_version: None,
        })
    }

    /// Replaces the organization whose domain `id` equals `args.id`,
    /// inserting it when absent.
    ///
    /// The returned id comes from the document as it was before the
    /// replacement, so it is `None` when the call inserted.
    pub async fn update_organization(&self, args: &ServiceArgs) -> ServiceResult<UpdateOutcome> {
        info!(resource = RESOURCE, operation = "update_organization", "service call");
        let id = args.require_id()?;
        let document = keyed_document(args, Some(id.clone()))?;

        let previous = self
            .collection()
            .find_one_and_replace(&Filter::eq("id", id), document, ReplaceOptions::upsert())
            .await
            .map_err(|e| storage_failure(RESOURCE, "update_organization", e))?;

        let previous_id = previous
            .as_ref()
            .and_then(|doc| doc.get("id"))
            .and_then(Value::as_str)
            .map(str::to_string);

        Ok(UpdateOutcome {
            id: previous_id,
            created: previous.is_none(),
            resource_version: None,
        })
    }

    /// Deletes every organization whose domain `id` equals `args.id`.
    ///
    /// Succeeds whether or not anything was deleted; a storage failure is
    /// reported as a 409 conflict.
    pub async fn delete_organization(&self, args: &ServiceArgs) -> ServiceResult<()> {
        info!(resource = RESOURCE, operation = "delete_organization", "service call");
        let id = args.require_id()?;

        match self.collection().delete_many(&Filter::eq("id", id)).await {
            Ok(_) => Ok(()),
            Err(e) => {
                error!(
                    resource = RESOURCE,
                    operation = "delete_organization",
                    category = %e.category(),
                    error = %e,
                    "storage error"
                );
                Err(ServiceError::conflict(e.to_string()))
            }
        }
    }
}

/// `args.resource` as a document, with `_id` set to `key` when given.
fn keyed_document(args: &ServiceArgs, key: Option<String>) -> ServiceResult<Document> {
    let body = args
        .resource()
        .cloned()
        .ok_or_else(|| ServiceError::invalid_argument("missing required argument 'resource'"))?;

    let Value::Object(map) = body else {
        return Err(ServiceError::invalid_argument(
            "argument 'resource' must be a JSON object",
        ));
    };
    let organization: Organization = from_document(map)?;
    let mut document = fhirdoc_core::to_document(&organization)?;

    if let Some(key) = key {
        document.insert(STORAGE_KEY.to_string(), Value::String(key));
    }
    Ok(document)
}
