//! In-process map backend.

use crate::store::{KeyValueStore, Value};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Ephemeral backend over an in-process map.
///
/// Doubles as the test backend: it counts every operation so tests can
/// assert how often the binder actually touched the store, and it can
/// artificially delay each operation to widen race windows.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Value>>,
    delay: Option<Duration>,
    gets: AtomicUsize,
    sets: AtomicUsize,
    removes: AtomicUsize,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store whose every operation sleeps for `delay`
    /// before touching the map.
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    /// Number of `get_item` calls served so far.
    pub fn get_count(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    /// Number of `set_item` calls served so far.
    pub fn set_count(&self) -> usize {
        self.sets.load(Ordering::SeqCst)
    }

    /// Number of `remove_item` calls served so far.
    pub fn remove_count(&self) -> usize {
        self.removes.load(Ordering::SeqCst)
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    /// Whether the store holds no keys.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    async fn pause(&self) {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get_item(&self, key: &str) -> Option<Value> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        self.pause().await;
        self.entries.lock().unwrap().get(key).cloned()
    }

    async fn set_item(&self, key: &str, value: Value) {
        self.sets.fetch_add(1, Ordering::SeqCst);
        self.pause().await;
        self.entries.lock().unwrap().insert(key.to_string(), value);
    }

    async fn remove_item(&self, key: &str) {
        self.removes.fetch_add(1, Ordering::SeqCst);
        self.pause().await;
        self.entries.lock().unwrap().remove(key);
    }
}
