//! Pending-operation tracking.
//!
//! Property writes are fire-and-forget: assignment must not block on disk
//! latency. The tracker is what gives that back — every store operation the
//! binder issues is registered here, and [`PendingOps::barrier`] lets a
//! shutdown path (or a "save complete" signal) wait until persistence is
//! quiescent.

use crate::config::Engine;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, OnceLock};
use std::time::Duration;

/// How often the barrier re-checks a non-quiescent registry.
pub const POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Ids wrap back to zero before reaching this bound.
const ID_WRAP_LIMIT: u64 = u64::MAX - 2;

/// One outstanding asynchronous read or write.
///
/// Created by [`PendingOps::start`], completed (idempotently) by
/// [`PendingOps::done`], and purged from the registry by the next barrier
/// sweep that observes it done.
#[derive(Debug)]
pub struct PendingOperation {
    engine: Engine,
    id: u64,
    label: &'static str,
    done: AtomicBool,
}

impl PendingOperation {
    /// Engine this operation runs against.
    pub fn engine(&self) -> Engine {
        self.engine
    }

    /// Registry-assigned id.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// What kind of operation this is (`"init"`, `"set"`, ...).
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Whether the operation has completed.
    pub fn is_done(&self) -> bool {
        self.done.load(Ordering::SeqCst)
    }
}

/// Registry of in-flight store operations.
///
/// One process-wide instance backs the [`Stor`](crate::Stor) facade, but the
/// tracker is an ordinary component: tests and embedders can run their own.
#[derive(Debug, Default)]
pub struct PendingOps {
    inner: Mutex<Registry>,
}

#[derive(Debug, Default)]
struct Registry {
    ops: Vec<Arc<PendingOperation>>,
    next_id: u64,
}

impl PendingOps {
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide tracker used by the facade.
    pub fn global() -> Arc<PendingOps> {
        static GLOBAL: OnceLock<Arc<PendingOps>> = OnceLock::new();
        Arc::clone(GLOBAL.get_or_init(|| Arc::new(PendingOps::new())))
    }

    /// Registers a new operation.
    ///
    /// Ids are assigned under the registry lock, so two live operations can
    /// never alias even across counter wraparound.
    pub fn start(&self, engine: Engine, label: &'static str) -> Arc<PendingOperation> {
        let mut registry = self.inner.lock().unwrap();
        let id = registry.next_id;
        registry.next_id = if id >= ID_WRAP_LIMIT { 0 } else { id + 1 };
        let op = Arc::new(PendingOperation {
            engine,
            id,
            label,
            done: AtomicBool::new(false),
        });
        registry.ops.push(Arc::clone(&op));
        op
    }

    /// Marks an operation complete. Idempotent.
    pub fn done(&self, op: &PendingOperation) {
        op.done.store(true, Ordering::SeqCst);
    }

    /// Number of registered operations not yet observed done.
    pub fn pending_count(&self) -> usize {
        self.inner
            .lock()
            .unwrap()
            .ops
            .iter()
            .filter(|op| !op.is_done())
            .count()
    }

    /// Resolves once every registered operation has completed.
    ///
    /// Each sweep drops the records it observes done; when the registry is
    /// empty the barrier resolves, otherwise it re-checks every
    /// [`POLL_INTERVAL`]. Safe to call concurrently — every caller resolves
    /// once the registry drains, and operations registered while a barrier
    /// is waiting are waited on too.
    pub async fn barrier(&self) {
        loop {
            {
                let mut registry = self.inner.lock().unwrap();
                registry.ops.retain(|op| !op.is_done());
                if registry.ops.is_empty() {
                    return;
                }
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }
}
