//! The no-op backend.

use crate::store::{KeyValueStore, Value};
use async_trait::async_trait;

/// Backend used wherever a real one is structurally unavailable (no
/// resolvable storage root, for instance).
///
/// Every read answers absent and every write succeeds without touching
/// anything, so binder logic stays environment-agnostic: only in-memory
/// default seeding happens on top of this store.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopStore;

#[async_trait]
impl KeyValueStore for NoopStore {
    async fn get_item(&self, _key: &str) -> Option<Value> {
        None
    }

    async fn set_item(&self, _key: &str, _value: Value) {}

    async fn remove_item(&self, _key: &str) {}
}
