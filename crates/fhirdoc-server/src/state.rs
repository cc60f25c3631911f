use std::sync::Arc;

use fhirdoc_core::FhirVersion;
use fhirdoc_db_memory::create_memory_store;
use fhirdoc_services::{ObservationService, OrganizationService};
use fhirdoc_storage::{DynStore, StorageError};
use thiserror::Error;

use crate::config::{AppConfig, StorageBackend};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Storage backend '{0}' is not compiled in; rebuild with --features {0}")]
    BackendUnavailable(StorageBackend),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Store handle and services built from one configuration.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: DynStore,
    pub organizations: OrganizationService,
    pub observations: ObservationService,
}

impl AppState {
    /// Validates `config`, opens the configured backend and wires both
    /// services to it.
    pub async fn from_config(config: AppConfig) -> Result<Self, StartupError> {
        config.validate().map_err(StartupError::Config)?;
        let store = open_store(&config).await?;
        tracing::info!(
            backend = store.backend_name(),
            fhir.version = %config.fhir.default_version,
            fhir.release = config.fhir.default_version.release_name(),
            "Storage initialized"
        );
        Ok(Self::with_store(config, store))
    }

    /// Wires the services to an already opened store.
    pub fn with_store(config: AppConfig, store: DynStore) -> Self {
        Self {
            config: Arc::new(config),
            organizations: OrganizationService::new(store.clone()),
            observations: ObservationService::new(store.clone()),
            store,
        }
    }

    pub fn default_version(&self) -> FhirVersion {
        self.config.fhir.default_version
    }
}

async fn open_store(config: &AppConfig) -> Result<DynStore, StartupError> {
    match config.storage.backend {
        StorageBackend::Memory => Ok(create_memory_store()),
        StorageBackend::Mongodb => open_mongo(config).await,
    }
}

#[cfg(feature = "mongodb")]
async fn open_mongo(config: &AppConfig) -> Result<DynStore, StartupError> {
    let settings = config.storage.mongodb.clone().unwrap_or_default();
    let store = fhirdoc_db_mongo::MongoStore::connect(&settings.uri, &settings.database).await?;
    Ok(Arc::new(store))
}

#[cfg(not(feature = "mongodb"))]
async fn open_mongo(_config: &AppConfig) -> Result<DynStore, StartupError> {
    Err(StartupError::BackendUnavailable(StorageBackend::Mongodb))
}
