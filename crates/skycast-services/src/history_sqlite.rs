//! SQLite-based history storage.
//!
//! Rows are ordered by an autoincrement sequence so listing preserves
//! insertion order even when the same city id is stored more than once.

use rusqlite::{params, Connection};
use std::path::Path;

use crate::history_backend::{HistoryBackend, HistoryEntry, HistoryError, HistoryResult};

/// SQLite-based history storage.
pub struct SqliteHistoryStore {
    conn: Connection,
}

impl SqliteHistoryStore {
    /// Open a history database at the given path.
    ///
    /// Creates the database file, its parent directory and the schema if they don't exist.
    pub fn new<P: AsRef<Path>>(path: P) -> HistoryResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                HistoryError::write(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }

        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    /// Create an in-memory history store (for testing).
    #[cfg(test)]
    pub fn in_memory() -> HistoryResult<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> HistoryResult<()> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS history (
                seq INTEGER PRIMARY KEY AUTOINCREMENT,
                city_id INTEGER NOT NULL,
                name TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_history_city_id ON history(city_id);
            "#,
        )?;
        Ok(())
    }
}

impl HistoryBackend for SqliteHistoryStore {
    fn append(&self, entry: HistoryEntry) -> HistoryResult<()> {
        self.conn.execute(
            "INSERT INTO history (city_id, name) VALUES (?1, ?2)",
            params![entry.id, entry.name],
        )?;
        tracing::debug!(
            "Appended {} ({}) at seq {}",
            entry.name,
            entry.id,
            self.conn.last_insert_rowid()
        );
        Ok(())
    }

    fn list(&self) -> HistoryResult<Vec<HistoryEntry>> {
        let mut stmt = self
            .conn
            .prepare("SELECT name, city_id FROM history ORDER BY seq ASC")?;

        let rows = stmt.query_map([], |row| {
            Ok(HistoryEntry {
                name: row.get(0)?,
                id: row.get(1)?,
            })
        })?;

        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    fn delete_by_id(&self, id: i64) -> HistoryResult<usize> {
        let removed = self
            .conn
            .execute("DELETE FROM history WHERE city_id = ?1", params![id])?;

        if removed == 0 {
            return Err(HistoryError::NotFound(id));
        }

        tracing::debug!("Deleted {} history rows with id {}", removed, id);
        Ok(removed)
    }

    fn count(&self) -> HistoryResult<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM history", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}
