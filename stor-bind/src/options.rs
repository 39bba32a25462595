//! Per-property binding options.

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use stor_store::Value;
use tracing::warn;

type TransformFrom<T> = Arc<dyn Fn(Value) -> Option<T> + Send + Sync>;
type TransformTo<T> = Arc<dyn Fn(&T) -> Value + Send + Sync>;

/// Options recognized when binding a property.
///
/// - a *default value*, seeded into the store on the first-ever access for
///   the property's key (and only then);
/// - a *from* transform mapping the raw stored value to the in-memory type;
/// - a *to* transform mapping the in-memory value before persisting.
///
/// Absent transforms mean plain serde pass-through.
pub struct StoreOptions<T> {
    default_value: Option<T>,
    from: Option<TransformFrom<T>>,
    to: Option<TransformTo<T>>,
}

impl<T> StoreOptions<T> {
    /// Options with no default and pass-through transforms.
    pub fn new() -> Self {
        Self {
            default_value: None,
            from: None,
            to: None,
        }
    }

    /// Options carrying a default value.
    pub fn with_default(value: T) -> Self {
        Self {
            default_value: Some(value),
            from: None,
            to: None,
        }
    }

    /// Sets the raw-to-memory transform. Returning `None` counts as absent.
    #[must_use]
    pub fn transform_from(mut self, f: impl Fn(Value) -> Option<T> + Send + Sync + 'static) -> Self {
        self.from = Some(Arc::new(f));
        self
    }

    /// Sets the memory-to-raw transform.
    #[must_use]
    pub fn transform_to(mut self, f: impl Fn(&T) -> Value + Send + Sync + 'static) -> Self {
        self.to = Some(Arc::new(f));
        self
    }

    /// The configured default, if any.
    pub fn default_value(&self) -> Option<&T> {
        self.default_value.as_ref()
    }
}

impl<T: DeserializeOwned> StoreOptions<T> {
    /// Maps a raw stored value into the in-memory type.
    pub(crate) fn decode(&self, raw: Value) -> Option<T> {
        match &self.from {
            Some(f) => f(raw),
            None => match serde_json::from_value(raw) {
                Ok(value) => Some(value),
                Err(err) => {
                    warn!(%err, "stored value did not decode, treating as absent");
                    None
                }
            },
        }
    }
}

impl<T: Serialize> StoreOptions<T> {
    /// Maps an in-memory value to its raw stored form.
    pub(crate) fn encode(&self, value: &T) -> Option<Value> {
        match &self.to {
            Some(f) => Some(f(value)),
            None => match serde_json::to_value(value) {
                Ok(raw) => Some(raw),
                Err(err) => {
                    warn!(%err, "value did not encode, skipping persist");
                    None
                }
            },
        }
    }

    /// Raw form of the configured default, if any.
    pub(crate) fn encode_default(&self) -> Option<Value> {
        self.default_value.as_ref().and_then(|value| self.encode(value))
    }
}

impl<T> Default for StoreOptions<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for StoreOptions<T> {
    fn clone(&self) -> Self {
        Self {
            default_value: self.default_value.clone(),
            from: self.from.clone(),
            to: self.to.clone(),
        }
    }
}
