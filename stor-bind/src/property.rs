//! The bound property.
//!
//! A [`StoredProperty`] is the runtime association between one in-memory
//! value and one storage key. Accessors are synchronous and never suspend:
//! reads answer from memory, writes update memory immediately and persist in
//! the background. All store traffic runs as registered pending operations
//! so a barrier can wait it out.
//!
//! Lifecycle per handle: `Idle → Running → Ready`. The first access (read or
//! write) starts exactly one initialization sequence; the in-flight marker
//! is set under the state lock before any store call, so concurrent first
//! accesses can never start a second sequence.

use crate::config::Engine;
use crate::options::StoreOptions;
use crate::pending::PendingOps;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::{Arc, Mutex};
use stor_store::{KeyValueStore, Value};
use tokio::runtime::Handle;
use tokio::sync::watch;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Running,
    Ready,
}

struct PropertyState<T> {
    phase: Phase,
    value: Option<T>,
    /// Set on the first explicit write; an explicitly written value is
    /// authoritative and must not be clobbered by a late-arriving stored
    /// value from the initialization read.
    dirty: bool,
    /// Sequence of the most recent write; persist tasks carrying an older
    /// sequence skip their store write.
    write_seq: u64,
}

struct PropertyInner<T> {
    engine: Engine,
    store: Arc<dyn KeyValueStore>,
    tracker: Arc<PendingOps>,
    value_key: String,
    flag_key: String,
    options: StoreOptions<T>,
    state: Mutex<PropertyState<T>>,
    init_tx: watch::Sender<bool>,
    /// Serializes store writes for this key, so the store converges to the
    /// last value in assignment order even when it would reorder concurrent
    /// writes on its own.
    write_gate: tokio::sync::Mutex<()>,
}

/// A property bound to a storage key.
///
/// Cloning yields another handle to the *same* bound property (same
/// in-memory value, same lifecycle). Binding the same scope and property
/// again produces an independent handle that shares only the persisted
/// state.
pub struct StoredProperty<T> {
    inner: Arc<PropertyInner<T>>,
}

impl<T> Clone for StoredProperty<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> std::fmt::Debug for StoredProperty<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoredProperty")
            .field("value_key", &self.inner.value_key)
            .field("flag_key", &self.inner.flag_key)
            .finish_non_exhaustive()
    }
}

impl<T> StoredProperty<T>
where
    T: Serialize + DeserializeOwned + Clone + Send + Sync + 'static,
{
    pub(crate) fn new(
        engine: Engine,
        store: Arc<dyn KeyValueStore>,
        tracker: Arc<PendingOps>,
        value_key: String,
        flag_key: String,
        options: StoreOptions<T>,
    ) -> Self {
        let (init_tx, _) = watch::channel(false);
        Self {
            inner: Arc::new(PropertyInner {
                engine,
                store,
                tracker,
                value_key,
                flag_key,
                options,
                state: Mutex::new(PropertyState {
                    phase: Phase::Idle,
                    value: None,
                    dirty: false,
                    write_seq: 0,
                }),
                init_tx,
                write_gate: tokio::sync::Mutex::new(()),
            }),
        }
    }

    /// Returns the current value.
    ///
    /// Never blocks: while initialization is still in flight this answers
    /// the configured default (or `None`), and a freshly assigned value is
    /// visible immediately. Triggers initialization as a side effect.
    pub fn get(&self) -> Option<T> {
        self.ensure_init();
        let state = self.inner.state.lock().unwrap();
        state
            .value
            .clone()
            .or_else(|| self.inner.options.default_value().cloned())
    }

    /// Assigns a new value.
    ///
    /// The in-memory update is synchronous — a `get` right after this call
    /// returns `value` regardless of store latency. Persistence happens in
    /// the background as a registered pending operation; failures are
    /// swallowed at the store boundary.
    pub fn set(&self, value: T) {
        let seq = {
            let mut state = self.inner.state.lock().unwrap();
            state.value = Some(value.clone());
            state.dirty = true;
            state.write_seq = state.write_seq.wrapping_add(1);
            state.write_seq
        };
        self.ensure_init();
        self.spawn_persist(value, seq);
    }

    /// Resolves once this handle's initialization sequence has finished.
    ///
    /// Accessors never wait for this; it exists for tests and shutdown
    /// paths that want the stored value adopted before proceeding.
    pub async fn ready(&self) {
        self.ensure_init();
        let mut rx = self.inner.init_tx.subscribe();
        while !*rx.borrow_and_update() {
            if rx.changed().await.is_err() {
                return;
            }
        }
    }

    /// Key holding the persisted value.
    pub fn value_key(&self) -> &str {
        &self.inner.value_key
    }

    /// Key recording that the default value was seeded.
    pub fn flag_key(&self) -> &str {
        &self.inner.flag_key
    }

    /// Starts the initialization sequence if no access has started it yet.
    fn ensure_init(&self) {
        {
            let mut state = self.inner.state.lock().unwrap();
            if state.phase != Phase::Idle {
                return;
            }
            state.phase = Phase::Running;
        }

        let op = self.inner.tracker.start(self.inner.engine, "init");
        let inner = Arc::clone(&self.inner);
        match Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    inner.initialize().await;
                    inner.finish_init();
                    inner.tracker.done(&op);
                });
            }
            Err(_) => {
                // No async runtime to read the store from; keep the handle
                // usable with in-memory defaults only.
                warn!(key = %inner.value_key, "no async runtime, property stays memory-only");
                {
                    let mut state = inner.state.lock().unwrap();
                    if !state.dirty {
                        state.value = inner.options.default_value().cloned();
                    }
                }
                inner.finish_init();
                inner.tracker.done(&op);
            }
        }
    }

    fn spawn_persist(&self, value: T, seq: u64) {
        let op = self.inner.tracker.start(self.inner.engine, "set");
        let inner = Arc::clone(&self.inner);
        let Ok(handle) = Handle::try_current() else {
            warn!(key = %inner.value_key, "no async runtime, write stays in memory");
            inner.tracker.done(&op);
            return;
        };
        handle.spawn(async move {
            let payload = inner.options.encode(&value);
            {
                let _gate = inner.write_gate.lock().await;
                let newest = inner.state.lock().unwrap().write_seq;
                if newest == seq {
                    if let Some(raw) = payload {
                        inner.store.set_item(&inner.value_key, raw).await;
                    }
                } else {
                    debug!(key = %inner.value_key, seq, newest, "skipping superseded write");
                }
            }
            inner.tracker.done(&op);
        });
    }
}

impl<T> PropertyInner<T>
where
    T: Serialize + DeserializeOwned + Clone + Send + Sync + 'static,
{
    fn finish_init(&self) {
        self.state.lock().unwrap().phase = Phase::Ready;
        let _ = self.init_tx.send(true);
    }

    /// The one-shot initialization sequence.
    ///
    /// Store failures never surface here — backends resolve them to absent
    /// reads and successful writes — so this always runs to completion and
    /// the handle always reaches `Ready`.
    async fn initialize(&self) {
        if self.options.default_value().is_none() {
            // No default: adopt the stored value when there is one.
            if let Some(raw) = self.store.get_item(&self.value_key).await
                && let Some(value) = self.options.decode(raw)
            {
                let mut state = self.state.lock().unwrap();
                if !state.dirty {
                    state.value = Some(value);
                }
            }
            return;
        }

        let seeded = match self.store.get_item(&self.flag_key).await {
            Some(Value::Bool(flag)) => flag,
            Some(_) => true,
            None => false,
        };

        if seeded {
            let stored = match self.store.get_item(&self.value_key).await {
                Some(raw) => self.options.decode(raw),
                None => None,
            };
            let mut state = self.state.lock().unwrap();
            if !state.dirty {
                state.value = stored.or_else(|| self.options.default_value().cloned());
            }
        } else {
            // First-ever access for this key: seed the default. The flag
            // write must settle before the value write is issued.
            debug!(key = %self.value_key, "seeding default value");
            self.store.set_item(&self.flag_key, Value::Bool(true)).await;
            if let Some(raw) = self.options.encode_default() {
                let _gate = self.write_gate.lock().await;
                let untouched = !self.state.lock().unwrap().dirty;
                if untouched {
                    self.store.set_item(&self.value_key, raw).await;
                }
            }
            let mut state = self.state.lock().unwrap();
            if !state.dirty {
                state.value = self.options.default_value().cloned();
            }
        }
    }
}
