//! Error types for the binding layer.

use crate::config::Engine;
use stor_store::StoreError;
use thiserror::Error;

/// Result type for binding operations.
pub type BindResult<T> = Result<T, BindError>;

/// Errors raised while binding a property.
///
/// All of these are programmer errors caught at bind time; once a
/// [`StoredProperty`](crate::StoredProperty) exists, its accessors never
/// fail — persistence trouble is swallowed and logged at the store boundary.
#[derive(Debug, Error)]
pub enum BindError {
    /// The property name was empty.
    #[error("property name must not be empty")]
    EmptyProperty,

    /// A file engine was selected without a file path.
    #[error("{engine} engine requires a file path")]
    MissingFilePath {
        /// The engine that needed a path.
        engine: Engine,
    },

    /// Store construction failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}
