//! Binding a property against an explicit store.
//!
//! [`Binder`] is the injection seam: it takes any [`KeyValueStore`] and any
//! [`PendingOps`] tracker, which is what keeps the binding logic testable
//! without the process-wide facade state. Application code usually goes
//! through [`Stor`](crate::Stor) instead.

use crate::config::Engine;
use crate::error::{BindError, BindResult};
use crate::options::StoreOptions;
use crate::pending::PendingOps;
use crate::property::StoredProperty;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use stor_keys::{Namespace, Scope, default_flag_key, value_key};
use stor_store::KeyValueStore;

/// Binds properties against one resolved store and tracker.
pub struct Binder {
    engine: Engine,
    store: Arc<dyn KeyValueStore>,
    tracker: Arc<PendingOps>,
}

impl Binder {
    /// Creates a binder over an explicit store and tracker.
    pub fn new(engine: Engine, store: Arc<dyn KeyValueStore>, tracker: Arc<PendingOps>) -> Self {
        Self {
            engine,
            store,
            tracker,
        }
    }

    /// Engine this binder was resolved for.
    pub fn engine(&self) -> Engine {
        self.engine
    }

    /// Binds `property` under `scope`, producing the stored-property handle.
    ///
    /// Validates configuration only — no store access happens until the
    /// handle's first read or write.
    pub fn bind<T>(
        &self,
        scope: &Scope,
        namespace: &Namespace,
        property: &str,
        options: StoreOptions<T>,
    ) -> BindResult<StoredProperty<T>>
    where
        T: Serialize + DeserializeOwned + Clone + Send + Sync + 'static,
    {
        if property.is_empty() {
            return Err(BindError::EmptyProperty);
        }
        Ok(StoredProperty::new(
            self.engine,
            Arc::clone(&self.store),
            Arc::clone(&self.tracker),
            value_key(namespace, scope, property),
            default_flag_key(namespace, scope, property),
            options,
        ))
    }
}
