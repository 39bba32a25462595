//! Backend selection and bind configuration.

use std::fmt;
use std::path::PathBuf;
use stor_keys::{Namespace, Scope};

/// A key-value storage medium.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Engine {
    /// In-process map; values die with the process.
    Memory,
    /// Single JSON map file under the storage root.
    Local,
    /// SQLite-backed transactional store under the storage root.
    Indexed,
    /// One raw-text value at an explicit file path.
    File,
    /// One JSON-encoded value at an explicit file path.
    JsonFile,
}

impl Engine {
    /// Short lowercase name, used in logs and pending-operation records.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Engine::Memory => "memory",
            Engine::Local => "local",
            Engine::Indexed => "indexed",
            Engine::File => "file",
            Engine::JsonFile => "json",
        }
    }

    /// Whether this engine needs an explicit file path at bind time.
    #[must_use]
    pub fn requires_file_path(&self) -> bool {
        matches!(self, Engine::File | Engine::JsonFile)
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything needed to bind a property, passed once.
///
/// A plain struct rather than a stateful fluent builder: the setters consume
/// and return the config, so nothing is shared between bind calls.
#[derive(Debug, Clone)]
pub struct BindConfig {
    /// Selected storage medium.
    pub engine: Engine,
    /// Key scope; defaults to the global sentinel.
    pub scope: Scope,
    /// Key namespace; defaults to the bare `stor` prefix.
    pub namespace: Namespace,
    /// Storage root for the `Local`/`Indexed` engines. When absent, a
    /// home-derived default is used; when neither resolves, those engines
    /// degrade to a no-op store.
    pub storage_dir: Option<PathBuf>,
    /// Backing path for the `File`/`JsonFile` engines. Required for those
    /// engines, ignored by the rest.
    pub file_path: Option<PathBuf>,
}

impl BindConfig {
    /// Creates a config for `engine` with default scope and namespace.
    pub fn new(engine: Engine) -> Self {
        Self {
            engine,
            scope: Scope::global(),
            namespace: Namespace::default(),
            storage_dir: None,
            file_path: None,
        }
    }

    /// Config for the in-process memory engine.
    pub fn memory() -> Self {
        Self::new(Engine::Memory)
    }

    /// Config for the local map-file engine.
    pub fn local() -> Self {
        Self::new(Engine::Local)
    }

    /// Config for the indexed (SQLite) engine.
    pub fn indexed() -> Self {
        Self::new(Engine::Indexed)
    }

    /// Config for the raw file engine at `path`.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        let mut config = Self::new(Engine::File);
        config.file_path = Some(path.into());
        config
    }

    /// Config for the JSON file engine at `path`.
    pub fn json_file(path: impl Into<PathBuf>) -> Self {
        let mut config = Self::new(Engine::JsonFile);
        config.file_path = Some(path.into());
        config
    }

    /// Sets the key scope.
    #[must_use]
    pub fn with_scope(mut self, scope: impl Into<Scope>) -> Self {
        self.scope = scope.into();
        self
    }

    /// Sets the key namespace.
    #[must_use]
    pub fn with_namespace(mut self, namespace: Namespace) -> Self {
        self.namespace = namespace;
        self
    }

    /// Sets the storage root for the ambient engines.
    #[must_use]
    pub fn with_storage_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.storage_dir = Some(dir.into());
        self
    }
}
