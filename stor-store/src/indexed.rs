//! Indexed (SQLite-backed) backend.

use crate::error::{StoreError, StoreResult};
use crate::store::{KeyValueStore, Value};
use async_trait::async_trait;
use rusqlite::{Connection, OptionalExtension, params};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tokio::task;
use tracing::warn;

/// Transactional key-value backend over a SQLite database.
///
/// Each mutation runs as a single implicit transaction, so readers never
/// observe a half-applied write. Blocking database calls are moved off the
/// async runtime with `spawn_blocking`.
pub struct IndexedStore {
    conn: Arc<Mutex<Connection>>,
}

impl std::fmt::Debug for IndexedStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexedStore").finish_non_exhaustive()
    }
}

impl IndexedStore {
    /// Opens (or creates) the database at `path`.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(StoreError::EmptyPath { backend: "indexed" });
        }
        let conn = Connection::open(path)
            .map_err(|e| StoreError::Open(format!("{}: {e}", path.display())))?;
        Self::with_conn(conn)
    }

    /// Opens an in-memory database (for testing).
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn =
            Connection::open_in_memory().map_err(|e| StoreError::Open(format!("in-memory: {e}")))?;
        Self::with_conn(conn)
    }

    fn with_conn(conn: Connection) -> StoreResult<Self> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS keyvaluepairs (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )
        .map_err(|e| StoreError::Open(format!("failed to init schema: {e}")))?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Runs `f` against the connection on the blocking pool, resolving to
    /// `None`/`()` on any failure.
    async fn with_conn_blocking<T, F>(&self, op: &'static str, f: F) -> Option<T>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> rusqlite::Result<T> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        let joined = task::spawn_blocking(move || {
            let conn = conn.lock().unwrap();
            f(&conn)
        })
        .await;
        match joined {
            Ok(Ok(value)) => Some(value),
            Ok(Err(err)) => {
                warn!(%op, %err, "indexed store operation failed");
                None
            }
            Err(err) => {
                warn!(%op, %err, "indexed store task failed");
                None
            }
        }
    }
}

#[async_trait]
impl KeyValueStore for IndexedStore {
    async fn get_item(&self, key: &str) -> Option<Value> {
        let key = key.to_string();
        let raw = self
            .with_conn_blocking("get", move |conn| {
                conn.query_row(
                    "SELECT value FROM keyvaluepairs WHERE key = ?1",
                    params![key],
                    |row| row.get::<_, String>(0),
                )
                .optional()
            })
            .await??;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(%err, "indexed store held unparseable value");
                None
            }
        }
    }

    async fn set_item(&self, key: &str, value: Value) {
        let key = key.to_string();
        let raw = match serde_json::to_string(&value) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(%err, "failed to encode value for indexed store");
                return;
            }
        };
        self.with_conn_blocking("set", move |conn| {
            conn.execute(
                "INSERT INTO keyvaluepairs (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                params![key, raw],
            )
        })
        .await;
    }

    async fn remove_item(&self, key: &str) {
        let key = key.to_string();
        self.with_conn_blocking("remove", move |conn| {
            conn.execute("DELETE FROM keyvaluepairs WHERE key = ?1", params![key])
        })
        .await;
    }
}
