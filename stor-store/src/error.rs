//! Error types for store construction.
//!
//! Runtime I/O failures are deliberately absent here: backends swallow those
//! and log them (see the crate docs). These errors cover programmer
//! mistakes, raised by constructors before any property access.

use thiserror::Error;

/// Result type for store construction.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised while constructing a store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A file-backed store was given an empty path.
    #[error("empty file path for {backend} store")]
    EmptyPath {
        /// Name of the backend that rejected the path.
        backend: &'static str,
    },

    /// The indexed store's database could not be opened.
    #[error("failed to open indexed store: {0}")]
    Open(String),
}
