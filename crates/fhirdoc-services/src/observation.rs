use fhirdoc_core::{
    FhirResource, Meta, Observation, STORAGE_KEY, id_or_generate, now_utc, resolve_schema,
    to_document,
};
use fhirdoc_search::ObservationSearchParams;
use fhirdoc_storage::DynStore;
use serde_json::Value;
use tracing::{debug, info};

use crate::args::{RequestContext, ServiceArgs};
use crate::error::{ServiceError, ServiceResult, storage_failure, undecodable_document};
use crate::outcome::{CreateOutcome, RemoveOutcome, UpdateOutcome};
use crate::{observation_collection, observation_history_collection};

const RESOURCE: &str = "Observation";

/// Handlers for Observation, stored per FHIR version in
/// `Observation_<base_version>` with snapshots in
/// `Observation_<base_version>_History`.
///
/// Only `search` and `create` touch the store. The by-id, version and
/// history reads return empty placeholder resources, `update` returns an
/// unsaved result and `remove` deletes nothing.
#[derive(Clone)]
pub struct ObservationService {
    store: DynStore,
}

impl ObservationService {
    pub fn new(store: DynStore) -> Self {
        Self { store }
    }

    /// Observations matching the request's search parameters, in storage
    /// order.
    pub async fn search(&self, args: &ServiceArgs) -> ServiceResult<Vec<Observation>> {
        info!(resource = RESOURCE, operation = "search", "service call");
        let version = args.base_version()?;
        let schema = resolve_schema::<Observation>(version)?;

        let params = ObservationSearchParams::from_lookup(|name| args.get_str(name));
        let filter = params.to_filter();
        debug!(resource = RESOURCE, filter = ?filter, "search filter");

        let collection_name = observation_collection(version);
        let collection = self.store.collection(&collection_name);
        let documents = match collection.find(&filter).await {
            Ok(cursor) => cursor.try_collect_vec().await,
            Err(e) => Err(e),
        }
        .map_err(|e| storage_failure(RESOURCE, "search", e))?;

        documents
            .into_iter()
            .map(|doc| {
                schema
                    .from_document(doc)
                    .map_err(|e| undecodable_document(RESOURCE, "search", &collection_name, e))
            })
            .collect()
    }

    pub async fn search_by_id(&self, args: &ServiceArgs) -> ServiceResult<Observation> {
        info!(resource = RESOURCE, operation = "search_by_id", "service call");
        let schema = resolve_schema::<Observation>(args.base_version()?)?;
        Ok(schema.instantiate())
    }

    pub async fn search_by_version_id(&self, args: &ServiceArgs) -> ServiceResult<Observation> {
        info!(resource = RESOURCE, operation = "search_by_version_id", "service call");
        let schema = resolve_schema::<Observation>(args.base_version()?)?;
        Ok(schema.instantiate())
    }

    pub async fn history(&self, args: &ServiceArgs) -> ServiceResult<Vec<Observation>> {
        info!(resource = RESOURCE, operation = "history", "service call");
        let schema = resolve_schema::<Observation>(args.base_version()?)?;
        Ok(vec![schema.instantiate()])
    }

    pub async fn history_by_id(&self, args: &ServiceArgs) -> ServiceResult<Vec<Observation>> {
        info!(resource = RESOURCE, operation = "history_by_id", "service call");
        let schema = resolve_schema::<Observation>(args.base_version()?)?;
        Ok(vec![schema.instantiate()])
    }

    /// Stores the request body as version 1 of a new Observation.
    ///
    /// The body's `id` is kept when present, otherwise a UUID is assigned,
    /// and it doubles as the storage key. A copy without the storage key is
    /// then written to the history collection. The two writes are
    /// independent: if the second fails the first is not undone.
    pub async fn create(
        &self,
        args: &ServiceArgs,
        ctx: &RequestContext,
    ) -> ServiceResult<CreateOutcome> {
        info!(resource = RESOURCE, operation = "create", "service call");
        let version = args.base_version()?;
        let schema = resolve_schema::<Observation>(version)?;

        let body = ctx
            .body
            .clone()
            .ok_or_else(|| ServiceError::invalid_argument("create requires a request body"))?;
        let mut observation = schema.construct(body)?;

        let id = id_or_generate(observation.id());
        observation.set_id(id.clone());
        observation.set_meta(Meta::first_version(now_utc().to_last_updated()));

        let history_document = to_document(&observation)?;
        let mut document = history_document.clone();
        document.insert(STORAGE_KEY.to_string(), Value::String(id.clone()));

        self.store
            .collection(&observation_collection(version))
            .insert_one(document)
            .await
            .map_err(|e| storage_failure(RESOURCE, "create", e))?;

        self.store
            .collection(&observation_history_collection(version))
            .insert_one(history_document)
            .await
            .map_err(|e| storage_failure(RESOURCE, "create_history", e))?;

        Ok(CreateOutcome {
            id: Some(id),
            resource_version: observation.meta.and_then(|m| m.version_id),
        })
    }

    /// Builds the updated resource with fresh metadata but stores nothing.
    pub async fn update(
        &self,
        args: &ServiceArgs,
        _ctx: &RequestContext,
    ) -> ServiceResult<UpdateOutcome> {
        info!(resource = RESOURCE, operation = "update", "service call");
        let schema = resolve_schema::<Observation>(args.base_version()?)?;

        let mut observation = schema.construct(args.resource().cloned().unwrap_or(Value::Null))?;
        observation.set_meta(Meta::default());

        Ok(UpdateOutcome {
            id: observation.id.clone(),
            created: false,
            resource_version: observation.meta.and_then(|m| m.version_id),
        })
    }

    /// Deletes nothing.
    pub async fn remove(
        &self,
        _args: &ServiceArgs,
        _ctx: &RequestContext,
    ) -> ServiceResult<RemoveOutcome> {
        info!(resource = RESOURCE, operation = "remove", "service call");
        Ok(RemoveOutcome { deleted: 0 })
    }
}
