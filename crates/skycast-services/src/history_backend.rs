//! Search history storage backend trait and error types.
//!
//! This module defines the `HistoryBackend` trait that abstracts over the
//! storage implementations (JSON file, SQLite, in-memory).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A previously searched city, keyed by the upstream city id.
///
/// Ids are not unique: searching the same city twice records it twice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub name: String,
    pub id: i64,
}

impl HistoryEntry {
    pub fn new(name: impl Into<String>, id: i64) -> Self {
        Self {
            name: name.into(),
            id,
        }
    }
}

/// Errors that can occur during history backend operations.
#[derive(Debug, Error)]
pub enum HistoryError {
    /// No entry with this id.
    #[error("History entry not found: {0}")]
    NotFound(i64),

    /// Stored data exists but cannot be decoded.
    #[error("History data is corrupt: {0}")]
    Corrupt(String),

    /// Reading the underlying storage failed.
    #[error("Read failed: {0}")]
    Read(String),

    /// Writing the underlying storage failed.
    #[error("Write failed: {0}")]
    Write(String),

    /// SQLite backend failure.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Generic error wrapper.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl HistoryError {
    /// Create a corrupt data error.
    pub fn corrupt(message: impl Into<String>) -> Self {
        Self::Corrupt(message.into())
    }

    /// Create a read error.
    pub fn read(message: impl Into<String>) -> Self {
        Self::Read(message.into())
    }

    /// Create a write error.
    pub fn write(message: impl Into<String>) -> Self {
        Self::Write(message.into())
    }
}

/// Result type for history backend operations.
pub type HistoryResult<T> = Result<T, HistoryError>;

/// Trait for search history backends.
///
/// Note: Implementations don't need to be Sync - the HistoryClient wrapper
/// serializes access via Mutex.
pub trait HistoryBackend: Send {
    /// Append an entry at the end. No duplicate check is made.
    fn append(&self, entry: HistoryEntry) -> HistoryResult<()>;

    /// All entries in insertion order.
    ///
    /// Returns an empty list when nothing has been stored yet.
    ///
    /// # Errors
    /// Returns `HistoryError::Corrupt` or `HistoryError::Read` when
    /// existing data cannot be read.
    fn list(&self) -> HistoryResult<Vec<HistoryEntry>>;

    /// Remove every entry with the given id and return how many were removed.
    ///
    /// # Errors
    /// Returns `HistoryError::NotFound` if no entry matched; the store is
    /// left unchanged in that case.
    fn delete_by_id(&self, id: i64) -> HistoryResult<usize>;

    /// Number of stored entries.
    fn count(&self) -> HistoryResult<usize> {
        Ok(self.list()?.len())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_entry_serializes_name_then_id() {
        let json = serde_json::to_string(&HistoryEntry::new("Paris", 2988507)).unwrap();
        assert_eq!(json, r#"{"name":"Paris","id":2988507}"#);
    }

    #[test]
    fn test_error_display() {
        assert!(HistoryError::NotFound(7).to_string().contains('7'));
        assert!(HistoryError::corrupt("bad json").to_string().contains("corrupt"));
    }
}
