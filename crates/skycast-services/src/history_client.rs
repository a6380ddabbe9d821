//! Unified history client supporting multiple backends.
//!
//! This module provides `HistoryClient`, an enum that wraps the JSON file,
//! SQLite and in-memory backends with a consistent async interface.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::history_backend::{HistoryBackend, HistoryEntry, HistoryError, HistoryResult};
use crate::history_memory::InMemoryHistoryStore;
use crate::history_sqlite::SqliteHistoryStore;
use crate::history_store::JsonFileHistoryStore;

/// Unified history client.
///
/// Storage work runs on the blocking pool. The mutex makes each
/// read-modify-write sequence atomic with respect to other requests in
/// this process.
#[derive(Clone)]
pub enum HistoryClient {
    /// Flat JSON file (default).
    Json(Arc<Mutex<JsonFileHistoryStore>>),

    /// Local SQLite database.
    Sqlite(Arc<Mutex<SqliteHistoryStore>>),

    /// Process memory only.
    Memory(Arc<Mutex<InMemoryHistoryStore>>),
}

impl HistoryClient {
    /// Create a JSON-file-backed history client.
    pub fn json(store: JsonFileHistoryStore) -> Self {
        Self::Json(Arc::new(Mutex::new(store)))
    }

    /// Create a SQLite-backed history client.
    pub fn sqlite(store: SqliteHistoryStore) -> Self {
        Self::Sqlite(Arc::new(Mutex::new(store)))
    }

    /// Create an in-memory history client.
    pub fn memory(store: InMemoryHistoryStore) -> Self {
        Self::Memory(Arc::new(Mutex::new(store)))
    }

    /// Short backend name for logging.
    pub fn backend_name(&self) -> &'static str {
        match self {
            Self::Json(_) => "json",
            Self::Sqlite(_) => "sqlite",
            Self::Memory(_) => "memory",
        }
    }

    /// Run a storage operation on the blocking pool while holding the backend lock.
    async fn run<T, F>(&self, op: F) -> HistoryResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&dyn HistoryBackend) -> HistoryResult<T> + Send + 'static,
    {
        let task = match self {
            Self::Json(store) => {
                let store = store.clone();
                tokio::task::spawn_blocking(move || {
                    let guard = store.lock();
                    let backend: &dyn HistoryBackend = &*guard;
                    op(backend)
                })
            }
            Self::Sqlite(store) => {
                let store = store.clone();
                tokio::task::spawn_blocking(move || {
                    let guard = store.lock();
                    let backend: &dyn HistoryBackend = &*guard;
                    op(backend)
                })
            }
            Self::Memory(store) => {
                let store = store.clone();
                tokio::task::spawn_blocking(move || {
                    let guard = store.lock();
                    let backend: &dyn HistoryBackend = &*guard;
                    op(backend)
                })
            }
        };

        task.await
            .map_err(|e| HistoryError::Other(anyhow::anyhow!("History task failed: {}", e)))?
    }

    /// Record a searched city.
    pub async fn append(&self, entry: HistoryEntry) -> HistoryResult<()> {
        self.run(move |store| store.append(entry)).await
    }

    /// All recorded cities in insertion order.
    pub async fn list(&self) -> HistoryResult<Vec<HistoryEntry>> {
        self.run(|store| store.list()).await
    }

    /// Number of recorded searches.
    pub async fn count(&self) -> HistoryResult<usize> {
        self.run(|store| store.count()).await
    }

    /// Remove every entry for a city id.
    pub async fn delete_by_id(&self, id: i64) -> HistoryResult<usize> {
        self.run(move |store| store.delete_by_id(id)).await
    }
}

impl std::fmt::Debug for HistoryClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("HistoryClient")
            .field(&self.backend_name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[tokio::test]
    async fn test_memory_client_roundtrip() {
        let client = HistoryClient::memory(InMemoryHistoryStore::new());

        client.append(HistoryEntry::new("Paris", 1)).await.unwrap();
        client.append(HistoryEntry::new("Tokyo", 2)).await.unwrap();

        assert_eq!(client.list().await.unwrap().len(), 2);
        assert_eq!(client.count().await.unwrap(), 2);
        assert_eq!(client.delete_by_id(1).await.unwrap(), 1);
        assert!(matches!(client.delete_by_id(1).await, Err(HistoryError::NotFound(1))));
    }

    #[tokio::test]
    async fn test_concurrent_appends_are_not_lost() {
        let dir = tempfile::tempdir().unwrap();
        let client = HistoryClient::json(JsonFileHistoryStore::new(dir.path().join("db.json")));

        let mut handles = Vec::new();
        for i in 0..20 {
            let client = client.clone();
            handles.push(tokio::spawn(async move {
                client.append(HistoryEntry::new(format!("City {}", i), i)).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(client.list().await.unwrap().len(), 20);
    }

    #[test]
    fn test_backend_name() {
        assert_eq!(HistoryClient::memory(InMemoryHistoryStore::new()).backend_name(), "memory");
        assert_eq!(
            HistoryClient::sqlite(SqliteHistoryStore::in_memory().unwrap()).backend_name(),
            "sqlite"
        );
    }
}
