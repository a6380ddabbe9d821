//! JSON file history storage.
//!
//! The whole history lives in one file as a pretty-printed JSON array. Every
//! mutation reads the full list, changes it in memory and rewrites the file.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::history_backend::{HistoryBackend, HistoryEntry, HistoryError, HistoryResult};

/// Flat-file history store.
#[derive(Debug, Clone)]
pub struct JsonFileHistoryStore {
    path: PathBuf,
}

impl JsonFileHistoryStore {
    /// Create a store backed by `path`. The file is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the file, treating missing or blank content as empty.
    fn read_entries(&self) -> HistoryResult<Vec<HistoryEntry>> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(HistoryError::read(format!(
                    "Failed to read {}: {}",
                    self.path.display(),
                    e
                )))
            }
        };

        if data.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&data).map_err(|e| {
            HistoryError::corrupt(format!("{}: {}", self.path.display(), e))
        })
    }

    /// Rewrite the whole file atomically (temp file in the same directory, then rename).
    fn write_entries(&self, entries: &[HistoryEntry]) -> HistoryResult<()> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir).map_err(|e| {
            HistoryError::write(format!("Failed to create {}: {}", dir.display(), e))
        })?;

        let json = serde_json::to_string_pretty(entries)
            .map_err(|e| HistoryError::write(format!("Failed to serialize history: {}", e)))?;

        let mut tmp = NamedTempFile::new_in(dir)
            .map_err(|e| HistoryError::write(format!("Failed to create temp file: {}", e)))?;
        tmp.write_all(json.as_bytes())
            .map_err(|e| HistoryError::write(format!("Failed to write history: {}", e)))?;
        tmp.persist(&self.path).map_err(|e| {
            HistoryError::write(format!(
                "Failed to replace {}: {}",
                self.path.display(),
                e.error
            ))
        })?;

        Ok(())
    }
}

impl HistoryBackend for JsonFileHistoryStore {
    fn append(&self, entry: HistoryEntry) -> HistoryResult<()> {
        // Unreadable history is dropped rather than blocking new searches
        let mut entries = self.read_entries().unwrap_or_else(|e| {
            tracing::warn!("Discarding unreadable history: {}", e);
            Vec::new()
        });

        tracing::debug!("Appending {} ({}) to history", entry.name, entry.id);
        entries.push(entry);
        self.write_entries(&entries)
    }

    fn list(&self) -> HistoryResult<Vec<HistoryEntry>> {
        self.read_entries()
    }

    fn delete_by_id(&self, id: i64) -> HistoryResult<usize> {
        let entries = self.read_entries()?;
        let before = entries.len();
        let remaining: Vec<HistoryEntry> = entries.into_iter().filter(|e| e.id != id).collect();

        let removed = before - remaining.len();
        if removed == 0 {
            return Err(HistoryError::NotFound(id));
        }

        self.write_entries(&remaining)?;
        tracing::debug!("Deleted {} history entries with id {}", removed, id);
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;
    use tempfile::TempDir;

    fn create_test_store() -> (TempDir, JsonFileHistoryStore) {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let store = JsonFileHistoryStore::new(dir.path().join("db").join("db.json"));
        (dir, store)
    }

    #[test]
    fn test_list_missing_file_is_empty() {
        let (_dir, store) = create_test_store();
        assert!(store.list().unwrap().is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_list_blank_file_is_empty() {
        let (_dir, store) = create_test_store();
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "  \n").unwrap();

        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_append_then_list_preserves_order() {
        let (_dir, store) = create_test_store();

        store.append(HistoryEntry::new("Paris", 1)).unwrap();
        store.append(HistoryEntry::new("Tokyo", 2)).unwrap();
        store.append(HistoryEntry::new("Lima", 3)).unwrap();

        let names: Vec<String> = store.list().unwrap().into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["Paris", "Tokyo", "Lima"]);
    }

    #[test]
    fn test_append_allows_duplicates() {
        let (_dir, store) = create_test_store();

        store.append(HistoryEntry::new("Paris", 1)).unwrap();
        store.append(HistoryEntry::new("Paris", 1)).unwrap();

        assert_eq!(store.count().unwrap(), 2);
    }

    #[test]
    fn test_file_is_pretty_json_array() {
        let (_dir, store) = create_test_store();
        store.append(HistoryEntry::new("Paris", 2988507)).unwrap();

        let raw = fs::read_to_string(store.path()).unwrap();
        assert_eq!(raw, "[\n  {\n    \"name\": \"Paris\",\n    \"id\": 2988507\n  }\n]");
    }

    #[test]
    fn test_delete_removes_all_matches() {
        let (_dir, store) = create_test_store();

        store.append(HistoryEntry::new("Paris", 1)).unwrap();
        store.append(HistoryEntry::new("Tokyo", 2)).unwrap();
        store.append(HistoryEntry::new("Paris", 1)).unwrap();

        assert_eq!(store.delete_by_id(1).unwrap(), 2);
        assert_eq!(store.list().unwrap(), vec![HistoryEntry::new("Tokyo", 2)]);
    }

    #[test]
    fn test_delete_absent_leaves_store_unchanged() {
        let (_dir, store) = create_test_store();
        store.append(HistoryEntry::new("Paris", 1)).unwrap();
        let before = fs::read_to_string(store.path()).unwrap();

        let result = store.delete_by_id(99);
        assert!(matches!(result, Err(HistoryError::NotFound(99))));
        assert_eq!(fs::read_to_string(store.path()).unwrap(), before);
    }

    #[test]
    fn test_delete_on_missing_file_is_not_found() {
        let (_dir, store) = create_test_store();
        assert!(matches!(store.delete_by_id(1), Err(HistoryError::NotFound(1))));
    }

    #[test]
    fn test_corrupt_file_fails_list_and_delete() {
        let (_dir, store) = create_test_store();
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "{not json").unwrap();

        assert!(matches!(store.list(), Err(HistoryError::Corrupt(_))));
        assert!(matches!(store.delete_by_id(1), Err(HistoryError::Corrupt(_))));
    }

    #[test]
    fn test_append_over_corrupt_file_starts_fresh() {
        let (_dir, store) = create_test_store();
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "{not json").unwrap();

        store.append(HistoryEntry::new("Paris", 1)).unwrap();
        assert_eq!(store.list().unwrap(), vec![HistoryEntry::new("Paris", 1)]);
    }
}
