//! Local map-file backend.

use crate::error::{StoreError, StoreResult};
use crate::store::{KeyValueStore, Value};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::warn;

/// Persistent backend over a single JSON file holding a key→value map.
///
/// The file is read lazily on first access and written through on every
/// mutation. A missing or unparseable file counts as an empty map — the
/// store stays usable and the problem is logged.
pub struct LocalStore {
    path: PathBuf,
    state: Mutex<MapState>,
}

impl std::fmt::Debug for LocalStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalStore")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

#[derive(Default)]
struct MapState {
    loaded: bool,
    entries: HashMap<String, Value>,
}

impl LocalStore {
    /// Creates a store over the map file at `path`.
    ///
    /// Fails only on an empty path; the file itself is created on the first
    /// write.
    pub fn new(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        if path.as_os_str().is_empty() {
            return Err(StoreError::EmptyPath { backend: "local" });
        }
        Ok(Self {
            path,
            state: Mutex::new(MapState::default()),
        })
    }

    /// Path of the backing map file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn ensure_loaded(&self, state: &mut MapState) {
        if state.loaded {
            return;
        }
        state.loaded = true;
        match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => match serde_json::from_str::<HashMap<String, Value>>(&raw) {
                Ok(entries) => state.entries = entries,
                Err(err) => {
                    warn!(path = %self.path.display(), %err, "local store file unreadable, starting empty");
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => {
                warn!(path = %self.path.display(), %err, "failed to read local store file");
            }
        }
    }

    async fn write_through(&self, state: &MapState) {
        let raw = match serde_json::to_string_pretty(&state.entries) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(path = %self.path.display(), %err, "failed to encode local store map");
                return;
            }
        };
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(err) = tokio::fs::create_dir_all(parent).await
        {
            warn!(path = %parent.display(), %err, "failed to create local store directory");
        }
        if let Err(err) = tokio::fs::write(&self.path, raw).await {
            warn!(path = %self.path.display(), %err, "failed to write local store file");
        }
    }
}

#[async_trait]
impl KeyValueStore for LocalStore {
    async fn get_item(&self, key: &str) -> Option<Value> {
        let mut state = self.state.lock().await;
        self.ensure_loaded(&mut state).await;
        state.entries.get(key).cloned()
    }

    async fn set_item(&self, key: &str, value: Value) {
        let mut state = self.state.lock().await;
        self.ensure_loaded(&mut state).await;
        state.entries.insert(key.to_string(), value);
        self.write_through(&state).await;
    }

    async fn remove_item(&self, key: &str) {
        let mut state = self.state.lock().await;
        self.ensure_loaded(&mut state).await;
        if state.entries.remove(key).is_some() {
            self.write_through(&state).await;
        }
    }
}
