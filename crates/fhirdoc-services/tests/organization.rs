//! OrganizationService against the in-memory store.

mod common;

use common::{FailingStore, doc, memory_store};
use fhirdoc_core::STORAGE_KEY;
use fhirdoc_services::{OrganizationService, ServiceArgs, ServiceError};
use fhirdoc_storage::DocumentStore;
use serde_json::{Value, json};

fn organization(id: &str, name: &str) -> Value {
    json!({
        "resourceType": "Organization",
        "id": id,
        "active": true,
        "name": name,
        "telecom": [{"system": "phone", "value": "555-0100"}]
    })
}

fn create_args(id: Option<&str>, resource: Value) -> ServiceArgs {
    let args = ServiceArgs::new().with("resource", resource);
    match id {
        Some(id) => args.with("id", id),
        None => args,
    }
}

#[tokio::test]
async fn count_is_zero_on_empty_collection() {
    let service = OrganizationService::new(memory_store());
    let count = service.get_count(&ServiceArgs::new()).await.expect("count");
    assert_eq!(count, 0);
}

#[tokio::test]
async fn count_tracks_created_organizations() {
    let service = OrganizationService::new(memory_store());

    for n in 0..5 {
        let id = format!("org-{n}");
        service
            .create_organization(&create_args(Some(&id), organization(&id, "Acme")))
            .await
            .expect("create");
    }

    let count = service.get_count(&ServiceArgs::new()).await.expect("count");
    assert_eq!(count, 5);
}

#[tokio::test]
async fn create_then_get_by_id_returns_the_resource() {
    let service = OrganizationService::new(memory_store());
    let resource = organization("42", "Acme Health");

    let created = service
        .create_organization(&create_args(Some("42"), resource.clone()))
        .await
        .expect("create");
    assert_eq!(created.id.as_deref(), Some("42"));

    let found = service
        .get_organization_by_id(&ServiceArgs::new().with("id", "42"))
        .await
        .expect("get")
        .expect("organization should exist");
    assert_eq!(serde_json::to_value(&found).expect("serialize"), resource);
}

#[tokio::test]
async fn get_by_id_compares_numeric_ids_as_strings() {
    let service = OrganizationService::new(memory_store());
    service
        .create_organization(&create_args(Some("7"), organization("7", "Seven")))
        .await
        .expect("create");

    let found = service
        .get_organization_by_id(&ServiceArgs::new().with("id", 7))
        .await
        .expect("get");
    assert_eq!(found.and_then(|o| o.name).as_deref(), Some("Seven"));
}

#[tokio::test]
async fn get_by_id_absent_is_none() {
    let service = OrganizationService::new(memory_store());
    let found = service
        .get_organization_by_id(&ServiceArgs::new().with("id", "missing"))
        .await
        .expect("get");
    assert!(found.is_none());
}

#[tokio::test]
async fn create_uses_supplied_id_as_storage_key() {
    let store = memory_store();
    let service = OrganizationService::new(store.clone());

    service
        .create_organization(&create_args(Some("42"), organization("42", "Acme")))
        .await
        .expect("create");

    let stored = store.memory_collection("Organization").snapshot().await;
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0][STORAGE_KEY], json!("42"));
}

#[tokio::test]
async fn create_without_id_gets_generated_storage_key() {
    let store = memory_store();
    let service = OrganizationService::new(store.clone());

    let created = service
        .create_organization(&create_args(None, organization("abc", "Acme")))
        .await
        .expect("create");
    // The returned id is the resource's own id, not the storage key.
    assert_eq!(created.id.as_deref(), Some("abc"));

    let stored = store.memory_collection("Organization").snapshot().await;
    let key = stored[0][STORAGE_KEY].as_str().expect("generated key");
    assert_eq!(key.len(), 24);
    assert_ne!(key, "abc");
}

#[tokio::test]
async fn create_with_taken_id_fails_with_storage_error() {
    let service = OrganizationService::new(memory_store());
    let args = create_args(Some("42"), organization("42", "Acme"));

    service.create_organization(&args).await.expect("first create");
    let err = service
        .create_organization(&args)
        .await
        .expect_err("duplicate key");
    assert!(err.is_storage());
}

#[tokio::test]
async fn create_requires_a_resource() {
    let service = OrganizationService::new(memory_store());
    let err = service
        .create_organization(&ServiceArgs::new().with("id", "1"))
        .await
        .expect_err("missing resource");
    assert!(matches!(err, ServiceError::InvalidArgument(_)));
}

#[tokio::test]
async fn update_of_missing_id_upserts_and_returns_no_id() {
    let store = memory_store();
    let service = OrganizationService::new(store.clone());

    let outcome = service
        .update_organization(&create_args(Some("new"), organization("new", "Fresh")))
        .await
        .expect("update");

    // The id comes from the pre-update document, and there was none.
    assert_eq!(outcome.id, None);
    assert!(outcome.created);

    let stored = store.memory_collection("Organization").snapshot().await;
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0][STORAGE_KEY], json!("new"));
    assert_eq!(stored[0]["name"], json!("Fresh"));
}

#[tokio::test]
async fn update_of_existing_id_replaces_and_returns_id() {
    let service = OrganizationService::new(memory_store());
    service
        .create_organization(&create_args(Some("42"), organization("42", "Old Name")))
        .await
        .expect("create");

    let outcome = service
        .update_organization(&create_args(Some("42"), organization("42", "New Name")))
        .await
        .expect("update");
    assert_eq!(outcome.id.as_deref(), Some("42"));
    assert!(!outcome.created);

    let found = service
        .get_organization_by_id(&ServiceArgs::new().with("id", "42"))
        .await
        .expect("get")
        .expect("exists");
    assert_eq!(found.name.as_deref(), Some("New Name"));
    assert_eq!(service.get_count(&ServiceArgs::new()).await.expect("count"), 1);
}

#[tokio::test]
async fn update_replaces_the_whole_document() {
    let store = memory_store();
    let service = OrganizationService::new(store.clone());
    service
        .create_organization(&create_args(Some("42"), organization("42", "Acme")))
        .await
        .expect("create");

    service
        .update_organization(&create_args(
            Some("42"),
            json!({"resourceType": "Organization", "id": "42"}),
        ))
        .await
        .expect("update");

    let stored = store.memory_collection("Organization").snapshot().await;
    assert!(!stored[0].contains_key("name"));
    assert!(!stored[0].contains_key("telecom"));
}

#[tokio::test]
async fn delete_removes_and_succeeds_when_absent() {
    let service = OrganizationService::new(memory_store());
    service
        .create_organization(&create_args(Some("42"), organization("42", "Acme")))
        .await
        .expect("create");

    let args = ServiceArgs::new().with("id", "42");
    service.delete_organization(&args).await.expect("delete");
    assert_eq!(service.get_count(&ServiceArgs::new()).await.expect("count"), 0);

    // Nothing left to delete is still a success.
    service.delete_organization(&args).await.expect("delete again");
}

#[tokio::test]
async fn delete_failure_is_a_409_conflict() {
    let service = OrganizationService::new(FailingStore::new());
    let err = service
        .delete_organization(&ServiceArgs::new().with("id", "42"))
        .await
        .expect_err("delete should fail");

    match &err {
        ServiceError::Conflict { code, message } => {
            assert_eq!(*code, 409);
            assert!(message.contains("simulated driver failure"));
        }
        other => panic!("expected conflict, got {other:?}"),
    }
    assert_eq!(err.status_code(), 409);
}

#[tokio::test]
async fn storage_errors_propagate_unchanged() {
    let service = OrganizationService::new(FailingStore::new());

    let err = service.get_count(&ServiceArgs::new()).await.expect_err("count");
    assert!(err.is_storage());
    assert_eq!(err.to_string(), "Backend error: simulated driver failure");

    let err = service
        .get_organization_by_id(&ServiceArgs::new().with("id", "1"))
        .await
        .expect_err("get");
    assert!(err.is_storage());

    let err = service
        .create_organization(&create_args(Some("1"), organization("1", "x")))
        .await
        .expect_err("create");
    assert!(err.is_storage());

    let err = service
        .update_organization(&create_args(Some("1"), organization("1", "x")))
        .await
        .expect_err("update");
    assert!(err.is_storage());
}

#[tokio::test]
async fn get_organization_is_not_implemented() {
    let store = memory_store();
    let service = OrganizationService::new(store.clone());

    let err = service
        .get_organization(&ServiceArgs::new().with("name", "Acme"))
        .await
        .expect_err("not implemented");
    assert!(err.is_not_implemented());
    assert!(!err.is_storage());
    assert_eq!(err.status_code(), 501);
    assert_eq!(store.stats().total(), 0);
}

#[tokio::test]
async fn documents_written_directly_are_readable() {
    let store = memory_store();
    store
        .collection("Organization")
        .insert_one(doc(json!({"_id": "x", "id": "x", "name": "Seeded"})))
        .await
        .expect("seed");

    let service = OrganizationService::new(store);
    let found = service
        .get_organization_by_id(&ServiceArgs::new().with("id", "x"))
        .await
        .expect("get")
        .expect("exists");
    assert_eq!(found.resource_type, "Organization");
    assert_eq!(found.name.as_deref(), Some("Seeded"));
}

#[tokio::test]
async fn get_by_id_over_malformed_stored_document_is_a_server_error() {
    let store = memory_store();
    store
        .collection("Organization")
        .insert_one(doc(json!({"_id": "x", "id": "x", "name": ["not", "a", "string"]})))
        .await
        .expect("seed");

    let service = OrganizationService::new(store);
    let err = service
        .get_organization_by_id(&ServiceArgs::new().with("id", "x"))
        .await
        .expect_err("undecodable document");
    assert!(err.is_storage());
    assert_eq!(err.status_code(), 500);
}
