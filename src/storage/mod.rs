//! Article persistence
//!
//! Deduplicating storage for extracted articles: one SQLite table keyed by
//! canonical URL with insert-or-replace semantics. The store is an explicit
//! object opened once at process start; nothing here runs at module load.

mod schema;
mod sqlite;

pub use schema::initialize_schema;
pub use sqlite::ArticleStore;

use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// A stored article row
#[derive(Debug, Clone)]
pub struct ArticleRecord {
    pub id: i64,
    pub url: String,
    pub title: String,
    pub body: String,
    pub fetched_at: String,
}
