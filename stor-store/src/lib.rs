//! Asynchronous key-value store backends for Stor.
//!
//! Every backend satisfies the same minimal contract, [`KeyValueStore`]:
//! `get_item` / `set_item` / `remove_item`, each asynchronous. Absence is not
//! an error — `get_item` answers `None` for a key that was never set — and
//! I/O failures never escape a backend as errors either: each backend
//! resolves to the safe default (absent read, successful write) and records
//! the failure through `tracing`, because the property binder above this
//! crate has no recovery path for store trouble.
//!
//! Backends:
//! - [`MemoryStore`] — in-process map; test double and ephemeral backend
//! - [`LocalStore`] — one JSON file holding a key→value map
//! - [`IndexedStore`] — SQLite-backed transactional key-value table
//! - [`FileStore`] — one whole value per file path, raw text or JSON
//! - [`NoopStore`] — stand-in when a backend is structurally unavailable
//!
//! Only *misconfiguration* (an empty path, an unopenable database) surfaces
//! as a typed [`StoreError`], and only from constructors — before any
//! property access happens.

mod error;
mod file;
mod indexed;
mod local;
mod memory;
mod noop;
mod runtime;
mod store;

pub use error::{StoreError, StoreResult};
pub use file::{FileFormat, FileStore};
pub use indexed::IndexedStore;
pub use local::LocalStore;
pub use memory::MemoryStore;
pub use noop::NoopStore;
pub use runtime::storage_root;
pub use store::{KeyValueStore, Value};
