//! Storage-key derivation.
//!
//! Each bound property maps to exactly two keys:
//! - the *value key*, holding the persisted value, and
//! - the *default-flag key*, recording that the configured default has
//!   already been seeded into the store (so it is seeded at most once per
//!   key, not on every process start).

use crate::scope::Scope;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Namespace prefix used when no application name is configured.
const DEFAULT_NAMESPACE: &str = "stor";

/// Suffix appended to a value key to form its default-flag key.
pub const DEFAULT_FLAG_SUFFIX: &str = "::defaultvalueisset";

/// The leading component of every storage key.
///
/// Applications that share a backing store can set a per-application
/// namespace so their keys never collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Namespace(String);

impl Namespace {
    /// Creates a namespace from a raw prefix string.
    pub fn new(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        if prefix.is_empty() {
            Self(DEFAULT_NAMESPACE.to_string())
        } else {
            Self(prefix)
        }
    }

    /// Derives a namespace from an application name, kebab-cased:
    /// `Namespace::for_app("My App")` yields `stor_my-app`.
    pub fn for_app(app_name: &str) -> Self {
        let slug = kebab_case(app_name);
        if slug.is_empty() {
            Self::default()
        } else {
            Self(format!("{DEFAULT_NAMESPACE}_{slug}"))
        }
    }

    /// Returns the namespace prefix.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.0
    }
}

impl Default for Namespace {
    fn default() -> Self {
        Self(DEFAULT_NAMESPACE.to_string())
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Derives the value key for a (scope, property) pair.
///
/// Pure concatenation: `<namespace>::stor.scope.<scope>.prop.<property>`.
/// Distinct (scope, property) pairs never collide because scope and property
/// occupy fixed, delimiter-separated positions.
#[must_use]
pub fn value_key(namespace: &Namespace, scope: &Scope, property: &str) -> String {
    format!(
        "{}::stor.scope.{}.prop.{}",
        namespace.prefix(),
        scope.name(),
        property
    )
}

/// Derives the default-flag key for a (scope, property) pair.
#[must_use]
pub fn default_flag_key(namespace: &Namespace, scope: &Scope, property: &str) -> String {
    format!("{}{}", value_key(namespace, scope, property), DEFAULT_FLAG_SUFFIX)
}

/// Lowercases and collapses non-alphanumeric runs into single dashes.
fn kebab_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut pending_dash = false;
    for ch in input.chars() {
        if ch.is_alphanumeric() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            for lower in ch.to_lowercase() {
                out.push(lower);
            }
        } else {
            pending_dash = true;
        }
    }
    out
}
