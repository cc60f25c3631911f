//! Tests against a live MongoDB.
//!
//! Run with: FHIRDOC_TEST_MONGODB_URI=mongodb://localhost:27017 \
//!   cargo test -p fhirdoc-db-mongo -- --ignored

use fhirdoc_db_mongo::MongoStore;
use fhirdoc_storage::{Condition, DocumentStore, Filter, ReplaceOptions};
use serde_json::json;

async fn store() -> MongoStore {
    let uri = std::env::var("FHIRDOC_TEST_MONGODB_URI")
        .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
    let database = format!("fhirdoc_test_{}", std::process::id());
    MongoStore::connect(&uri, &database).await.expect("connect")
}

#[tokio::test]
#[ignore = "requires a running MongoDB"]
async fn insert_find_replace_delete() {
    let store = store().await;
    let orgs = store.collection("Organization");
    orgs.delete_many(&Filter::new()).await.expect("clean");

    let doc = json!({"_id": "42", "id": "42", "name": "Acme"});
    orgs.insert_one(doc.as_object().cloned().expect("object"))
        .await
        .expect("insert");

    let dup = orgs
        .insert_one(doc.as_object().cloned().expect("object"))
        .await
        .expect_err("duplicate");
    assert!(dup.is_duplicate_key());

    let found = orgs
        .find_one(&Filter::new().with("name", Condition::regex_ci("^acm")))
        .await
        .expect("find")
        .expect("exists");
    assert_eq!(found["_id"], json!("42"));

    let replacement = json!({"_id": "42", "id": "42", "name": "Renamed"});
    let previous = orgs
        .find_one_and_replace(
            &Filter::eq("id", "42"),
            replacement.as_object().cloned().expect("object"),
            ReplaceOptions::upsert(),
        )
        .await
        .expect("replace")
        .expect("pre-image");
    assert_eq!(previous["name"], json!("Acme"));

    assert_eq!(orgs.delete_many(&Filter::eq("id", "42")).await.expect("delete"), 1);
    store.database().drop().await.expect("drop test database");
}
