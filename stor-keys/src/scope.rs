//! Key namespacing scopes.
//!
//! A scope disambiguates identically named properties across different owners.
//! It is usually derived from the owning type's name, but can be given
//! explicitly or left at the global sentinel.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel scope name used when no scope is given.
const GLOBAL_SCOPE: &str = "__GLOBAL_NAMESPACE__";

/// Fallback scope name for types whose name cannot be determined.
const ANON_SCOPE: &str = "__ANON__";

/// A namespace for storage keys, derived from an owner's name.
///
/// Immutable once bound to a property.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Scope(String);

impl Scope {
    /// Creates a scope from an explicit name.
    ///
    /// An empty name falls back to the anonymous sentinel so that key
    /// derivation never produces a key with a hole in it.
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        if name.is_empty() {
            Self(ANON_SCOPE.to_string())
        } else {
            Self(name)
        }
    }

    /// Creates a scope from a Rust type, using the last segment of its path.
    ///
    /// `Scope::of::<settings::User>()` and `Scope::named("User")` derive the
    /// same keys.
    #[must_use]
    pub fn of<T: ?Sized>() -> Self {
        let full = std::any::type_name::<T>();
        let name = full.rsplit("::").next().unwrap_or(full);
        Self::named(name)
    }

    /// Returns the global sentinel scope.
    #[must_use]
    pub fn global() -> Self {
        Self(GLOBAL_SCOPE.to_string())
    }

    /// Returns the scope name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl Default for Scope {
    fn default() -> Self {
        Self::global()
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Scope {
    fn from(name: &str) -> Self {
        Self::named(name)
    }
}

impl From<String> for Scope {
    fn from(name: String) -> Self {
        Self::named(name)
    }
}
