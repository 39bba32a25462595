use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use stor_store::{KeyValueStore, MemoryStore};

#[tokio::test]
async fn get_absent_returns_none() {
    let store = MemoryStore::new();
    assert_eq!(store.get_item("missing").await, None);
}

#[tokio::test]
async fn set_then_get_roundtrip() {
    let store = MemoryStore::new();
    store.set_item("k", json!({"a": 1})).await;
    assert_eq!(store.get_item("k").await, Some(json!({"a": 1})));
}

#[tokio::test]
async fn set_overwrites_silently() {
    let store = MemoryStore::new();
    store.set_item("k", json!(1)).await;
    store.set_item("k", json!(2)).await;
    assert_eq!(store.get_item("k").await, Some(json!(2)));
}

#[tokio::test]
async fn remove_deletes_and_tolerates_absence() {
    let store = MemoryStore::new();
    store.set_item("k", json!("v")).await;
    store.remove_item("k").await;
    assert_eq!(store.get_item("k").await, None);
    // removing again is a no-op
    store.remove_item("k").await;
}

#[tokio::test]
async fn operation_counters_track_calls() {
    let store = MemoryStore::new();
    store.set_item("a", json!(1)).await;
    store.set_item("b", json!(2)).await;
    store.get_item("a").await;
    store.remove_item("b").await;

    assert_eq!(store.set_count(), 2);
    assert_eq!(store.get_count(), 1);
    assert_eq!(store.remove_count(), 1);
    assert_eq!(store.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn delayed_store_still_settles() {
    let store = Arc::new(MemoryStore::with_delay(Duration::from_millis(500)));

    let writer = Arc::clone(&store);
    let handle = tokio::spawn(async move {
        writer.set_item("slow", json!("v")).await;
    });

    handle.await.unwrap();
    assert_eq!(store.get_item("slow").await, Some(json!("v")));
}
