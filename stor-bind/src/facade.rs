//! The process-wide entry point.
//!
//! Resolves a [`BindConfig`] to a concrete backend, reusing one store
//! instance per engine (and per path, for the ambient engines) so that every
//! handle bound to the same place shares the same serialization point.
//! Ambient engines degrade to the no-op store when the runtime has no usable
//! storage root — binder logic never branches on the environment.

use crate::binder::Binder;
use crate::config::{BindConfig, Engine};
use crate::error::{BindError, BindResult};
use crate::options::StoreOptions;
use crate::pending::PendingOps;
use crate::property::StoredProperty;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, OnceLock};
use stor_keys::{default_flag_key, value_key};
use stor_store::{
    FileFormat, FileStore, IndexedStore, KeyValueStore, LocalStore, MemoryStore, NoopStore,
    storage_root,
};
use tracing::warn;

/// File name of the local engine's map file under the storage root.
const LOCAL_FILE_NAME: &str = "stor.local.json";

/// File name of the indexed engine's database under the storage root.
const INDEXED_FILE_NAME: &str = "stor.indexed.db";

/// Facade over the process-wide tracker and the shared store instances.
pub struct Stor;

impl Stor {
    /// Binds `property` per `config`, producing a stored-property handle.
    ///
    /// Fails only on misconfiguration (empty property name, missing file
    /// path for a file engine, unconstructible file store) — a missing
    /// storage *environment* is not an error, it degrades to the no-op
    /// backend.
    pub fn bind<T>(
        config: BindConfig,
        property: &str,
        options: StoreOptions<T>,
    ) -> BindResult<StoredProperty<T>>
    where
        T: Serialize + DeserializeOwned + Clone + Send + Sync + 'static,
    {
        let store = resolve_store(&config)?;
        Binder::new(config.engine, store, PendingOps::global())
            .bind(&config.scope, &config.namespace, property, options)
    }

    /// Resolves once every pending operation registered through the facade
    /// has completed. Meant for shutdown paths and "save complete" signals.
    pub async fn barrier() {
        PendingOps::global().barrier().await;
    }

    /// Removes `property`'s value and default-seeded flag from the
    /// configured backend, restoring first-access-ever behavior for the
    /// next handle bound to the same place.
    pub async fn uncache(config: BindConfig, property: &str) -> BindResult<()> {
        if property.is_empty() {
            return Err(BindError::EmptyProperty);
        }
        let store = resolve_store(&config)?;
        store
            .remove_item(&value_key(&config.namespace, &config.scope, property))
            .await;
        store
            .remove_item(&default_flag_key(&config.namespace, &config.scope, property))
            .await;
        Ok(())
    }
}

/// Resolves the backend for a config, sharing instances process-wide.
fn resolve_store(config: &BindConfig) -> BindResult<Arc<dyn KeyValueStore>> {
    match config.engine {
        Engine::Memory => Ok(memory_store()),
        Engine::Local => Ok(local_store(config)),
        Engine::Indexed => Ok(indexed_store(config)),
        Engine::File | Engine::JsonFile => file_store(config),
    }
}

fn memory_store() -> Arc<dyn KeyValueStore> {
    static MEMORY: OnceLock<Arc<MemoryStore>> = OnceLock::new();
    let store = Arc::clone(MEMORY.get_or_init(|| Arc::new(MemoryStore::new())));
    store
}

fn local_store(config: &BindConfig) -> Arc<dyn KeyValueStore> {
    static LOCALS: OnceLock<Mutex<HashMap<PathBuf, Arc<LocalStore>>>> = OnceLock::new();

    let Some(root) = storage_root(config.storage_dir.as_deref()) else {
        warn!("no storage root, local engine degrades to no-op");
        return Arc::new(NoopStore);
    };
    let path = root.join(LOCAL_FILE_NAME);
    let mut stores = LOCALS.get_or_init(|| Mutex::new(HashMap::new())).lock().unwrap();
    if let Some(store) = stores.get(&path) {
        let store = Arc::clone(store);
        return store;
    }
    match LocalStore::new(&path) {
        Ok(store) => {
            let store = Arc::new(store);
            stores.insert(path, Arc::clone(&store));
            store
        }
        Err(err) => {
            warn!(path = %path.display(), %err, "local store unavailable, degrading to no-op");
            Arc::new(NoopStore)
        }
    }
}

fn indexed_store(config: &BindConfig) -> Arc<dyn KeyValueStore> {
    static INDEXED: OnceLock<Mutex<HashMap<PathBuf, Arc<IndexedStore>>>> = OnceLock::new();

    let Some(root) = storage_root(config.storage_dir.as_deref()) else {
        warn!("no storage root, indexed engine degrades to no-op");
        return Arc::new(NoopStore);
    };
    let path = root.join(INDEXED_FILE_NAME);
    let mut stores = INDEXED.get_or_init(|| Mutex::new(HashMap::new())).lock().unwrap();
    if let Some(store) = stores.get(&path) {
        let store = Arc::clone(store);
        return store;
    }
    if let Err(err) = std::fs::create_dir_all(&root) {
        warn!(path = %root.display(), %err, "cannot create storage root, degrading to no-op");
        return Arc::new(NoopStore);
    }
    match IndexedStore::open(&path) {
        Ok(store) => {
            let store = Arc::new(store);
            stores.insert(path, Arc::clone(&store));
            store
        }
        Err(err) => {
            warn!(path = %path.display(), %err, "indexed store unavailable, degrading to no-op");
            Arc::new(NoopStore)
        }
    }
}

fn file_store(config: &BindConfig) -> BindResult<Arc<dyn KeyValueStore>> {
    let path = config
        .file_path
        .clone()
        .ok_or(BindError::MissingFilePath {
            engine: config.engine,
        })?;
    let format = match config.engine {
        Engine::JsonFile => FileFormat::Json,
        _ => FileFormat::Raw,
    };
    Ok(Arc::new(FileStore::new(path, format)?))
}
