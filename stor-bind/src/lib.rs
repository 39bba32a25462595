//! Bound-property persistence for Stor.
//!
//! Binds a long-lived in-memory property to a key in an asynchronous
//! key-value store. A bound property lazily initializes from the store
//! exactly once (seeding a configured default on first-ever use), answers
//! reads from memory without blocking, and persists writes in the
//! background. A pending-operation tracker exposes a barrier so callers can
//! wait for all outstanding writes before shutdown.
//!
//! # Components
//!
//! - **Config**: [`BindConfig`] selects an [`Engine`] and a key [`Scope`]
//! - **Options**: [`StoreOptions`] carry the default value and transforms
//! - **Property**: [`StoredProperty`] is the bound handle with `get`/`set`
//! - **Tracker**: [`PendingOps`] registers in-flight operations and exposes
//!   [`PendingOps::barrier`]
//! - **Facade**: [`Stor`] resolves backends and owns the process-wide state
//!
//! # Example
//!
//! ```
//! use stor_bind::{BindConfig, Stor, StoreOptions};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let config = BindConfig::memory().with_scope("Settings");
//!     let theme = Stor::bind::<String>(
//!         config,
//!         "theme",
//!         StoreOptions::with_default("dark".to_string()),
//!     )
//!     .expect("valid binding");
//!
//!     assert_eq!(theme.get().as_deref(), Some("dark"));
//!
//!     theme.set("light".to_string());
//!     assert_eq!(theme.get().as_deref(), Some("light"));
//!
//!     // wait for background persistence before exiting
//!     Stor::barrier().await;
//! }
//! ```

mod binder;
mod config;
mod error;
mod facade;
mod options;
mod pending;
mod property;

pub use binder::Binder;
pub use config::{BindConfig, Engine};
pub use error::{BindError, BindResult};
pub use facade::Stor;
pub use options::StoreOptions;
pub use pending::{POLL_INTERVAL, PendingOperation, PendingOps};
pub use property::StoredProperty;

// Re-export the pieces of the lower crates that show up in this API.
pub use stor_keys::{Namespace, Scope};
pub use stor_store::{KeyValueStore, MemoryStore, NoopStore, Value};
