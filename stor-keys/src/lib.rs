//! Scope and storage-key derivation for Stor.
//!
//! This crate is the pure leaf of the workspace: given a namespace, a scope
//! and a property name, it derives the two storage keys every bound property
//! uses — the value key and the default-seeded flag key. Derivation is plain
//! string concatenation: identical inputs always yield identical keys, and
//! keys are stable across process restarts.
//!
//! No I/O, no clocks, no randomness lives here.

mod keys;
mod scope;

pub use keys::{DEFAULT_FLAG_SUFFIX, Namespace, default_flag_key, value_key};
pub use scope::Scope;
