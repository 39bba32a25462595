//! The key-value store capability.

use async_trait::async_trait;

/// Raw stored value. Backends traffic in JSON values; typed views live in
/// the binder layer above.
pub type Value = serde_json::Value;

/// Minimal asynchronous key-value contract every backend satisfies.
///
/// Implementations must not surface I/O failures through these methods:
/// a failed read answers `None`, a failed write answers success, and the
/// failure is logged. `None` from [`get_item`](Self::get_item) means the key
/// was never set (or was removed) — it is not an error condition.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`, or `None` if absent.
    async fn get_item(&self, key: &str) -> Option<Value>;

    /// Persists `value` under `key`, silently overwriting any previous value.
    async fn set_item(&self, key: &str, value: Value);

    /// Deletes `key`. A no-op if the key is absent.
    async fn remove_item(&self, key: &str);
}
