//! In-memory history storage, used by tests and the `memory` backend setting.

use parking_lot::Mutex;

use crate::history_backend::{HistoryBackend, HistoryEntry, HistoryError, HistoryResult};

#[derive(Debug, Default)]
pub struct InMemoryHistoryStore {
    entries: Mutex<Vec<HistoryEntry>>,
}

impl InMemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with existing entries.
    pub fn with_entries(entries: Vec<HistoryEntry>) -> Self {
        Self {
            entries: Mutex::new(entries),
        }
    }
}

impl HistoryBackend for InMemoryHistoryStore {
    fn append(&self, entry: HistoryEntry) -> HistoryResult<()> {
        self.entries.lock().push(entry);
        Ok(())
    }

    fn list(&self) -> HistoryResult<Vec<HistoryEntry>> {
        Ok(self.entries.lock().clone())
    }

    fn delete_by_id(&self, id: i64) -> HistoryResult<usize> {
        let mut entries = self.entries.lock();
        let before = entries.len();
        entries.retain(|e| e.id != id);

        match before - entries.len() {
            0 => Err(HistoryError::NotFound(id)),
            removed => Ok(removed),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_append_list_delete() {
        let store = InMemoryHistoryStore::new();
        store.append(HistoryEntry::new("Rome", 3169070)).unwrap();
        store.append(HistoryEntry::new("Quito", 3652462)).unwrap();

        assert_eq!(store.count().unwrap(), 2);
        assert_eq!(store.delete_by_id(3169070).unwrap(), 1);
        assert_eq!(store.list().unwrap(), vec![HistoryEntry::new("Quito", 3652462)]);
    }

    #[test]
    fn test_delete_absent_is_not_found() {
        let store = InMemoryHistoryStore::with_entries(vec![HistoryEntry::new("Rome", 1)]);

        assert!(matches!(store.delete_by_id(2), Err(HistoryError::NotFound(2))));
        assert_eq!(store.count().unwrap(), 1);
    }
}
