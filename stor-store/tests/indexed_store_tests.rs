use serde_json::json;
use stor_store::{IndexedStore, KeyValueStore, StoreError};

#[tokio::test]
async fn empty_path_is_rejected() {
    let err = IndexedStore::open("").unwrap_err();
    assert!(matches!(err, StoreError::EmptyPath { backend: "indexed" }));
}

#[tokio::test]
async fn unopenable_database_fails_fast() {
    let dir = tempfile::tempdir().unwrap();
    // a directory is not a valid database file
    let err = IndexedStore::open(dir.path()).unwrap_err();
    assert!(matches!(err, StoreError::Open(_)));
    assert!(format!("{err}").contains("indexed store"));
}

#[tokio::test]
async fn absent_key_reads_none() {
    let store = IndexedStore::open_in_memory().unwrap();
    assert_eq!(store.get_item("missing").await, None);
}

#[tokio::test]
async fn set_then_get_roundtrip() {
    let store = IndexedStore::open_in_memory().unwrap();
    store.set_item("k", json!({"nested": [1, 2, 3]})).await;
    assert_eq!(store.get_item("k").await, Some(json!({"nested": [1, 2, 3]})));
}

#[tokio::test]
async fn set_overwrites_silently() {
    let store = IndexedStore::open_in_memory().unwrap();
    store.set_item("k", json!("first")).await;
    store.set_item("k", json!("second")).await;
    assert_eq!(store.get_item("k").await, Some(json!("second")));
}

#[tokio::test]
async fn remove_deletes_and_tolerates_absence() {
    let store = IndexedStore::open_in_memory().unwrap();
    store.set_item("k", json!("v")).await;
    store.remove_item("k").await;
    assert_eq!(store.get_item("k").await, None);
    store.remove_item("k").await;
}

#[tokio::test]
async fn values_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stor.indexed.db");

    {
        let store = IndexedStore::open(&path).unwrap();
        store.set_item("persisted", json!(42)).await;
    }

    let reopened = IndexedStore::open(&path).unwrap();
    assert_eq!(reopened.get_item("persisted").await, Some(json!(42)));
}
