//! Whole-value file backend.

use crate::error::{StoreError, StoreResult};
use crate::store::{KeyValueStore, Value};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::warn;

/// On-disk encoding for a [`FileStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// The value's text form, written as-is. String values round-trip
    /// byte-for-byte; anything else is stored as its JSON text and read
    /// back as a string.
    Raw,
    /// JSON-serialized text; values of any shape round-trip.
    Json,
}

/// Backend that stores exactly one value at a fixed path.
///
/// The key is deliberately ignored: a file engine binds one property to one
/// file, and the path — not the key — is the identity. Callers pick raw or
/// JSON encoding up front.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    format: FileFormat,
}

impl FileStore {
    /// Creates a store writing `format`-encoded values at `path`.
    pub fn new(path: impl Into<PathBuf>, format: FileFormat) -> StoreResult<Self> {
        let path = path.into();
        if path.as_os_str().is_empty() {
            return Err(StoreError::EmptyPath { backend: "file" });
        }
        Ok(Self { path, format })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get_item(&self, _key: &str) -> Option<Value> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return None,
            Err(err) => {
                warn!(path = %self.path.display(), %err, "failed to read file store");
                return None;
            }
        };
        match self.format {
            FileFormat::Raw => Some(Value::String(raw)),
            FileFormat::Json => match serde_json::from_str(&raw) {
                Ok(value) => Some(value),
                Err(err) => {
                    warn!(path = %self.path.display(), %err, "file store held invalid JSON");
                    None
                }
            },
        }
    }

    async fn set_item(&self, _key: &str, value: Value) {
        let raw = match self.format {
            FileFormat::Raw => match value {
                Value::String(s) => s,
                other => other.to_string(),
            },
            FileFormat::Json => match serde_json::to_string_pretty(&value) {
                Ok(raw) => raw,
                Err(err) => {
                    warn!(path = %self.path.display(), %err, "failed to encode value for file store");
                    return;
                }
            },
        };
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(err) = tokio::fs::create_dir_all(parent).await
        {
            warn!(path = %parent.display(), %err, "failed to create file store directory");
        }
        if let Err(err) = tokio::fs::write(&self.path, raw).await {
            warn!(path = %self.path.display(), %err, "failed to write file store");
        }
    }

    async fn remove_item(&self, _key: &str) {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {}
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => {
                warn!(path = %self.path.display(), %err, "failed to remove file store");
            }
        }
    }
}
