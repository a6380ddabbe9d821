//! Search history storage for SkyCast.

pub mod history_backend;
pub mod history_client;
pub mod history_memory;
pub mod history_sqlite;
pub mod history_store;

pub use history_backend::{HistoryBackend, HistoryEntry, HistoryError, HistoryResult};
pub use history_client::HistoryClient;
pub use history_memory::InMemoryHistoryStore;
pub use history_sqlite::SqliteHistoryStore;
pub use history_store::JsonFileHistoryStore;
