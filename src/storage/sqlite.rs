//! SQLite article store
//!
//! An explicit store object constructed once at process start. Upserts are
//! keyed on the unique url column: a refetch replaces the stored title and
//! body and refreshes the fetch timestamp, leaving exactly one row per URL.

use crate::storage::schema::initialize_schema;
use crate::storage::{ArticleRecord, StorageResult};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// SQLite-backed article store
pub struct ArticleStore {
    conn: Connection,
}

impl ArticleStore {
    /// Opens (or creates) the article database at the given path
    pub fn new(path: &Path) -> StorageResult<Self> {
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA foreign_keys = ON;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory store (for testing)
    pub fn open_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Inserts an article or replaces the row sharing the same url
    ///
    /// The fetch timestamp always reflects the most recent upsert. The row
    /// id is stable across refreshes.
    pub fn upsert(&mut self, url: &str, title: &str, body: &str) -> StorageResult<()> {
        let now = Utc::now().to_rfc3339();
        self.conn.execute(
            "INSERT INTO articles (url, title, body, fetched_at) VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(url) DO UPDATE SET
                 title = excluded.title,
                 body = excluded.body,
                 fetched_at = excluded.fetched_at",
            params![url, title, body, now],
        )?;
        Ok(())
    }

    /// Gets a stored article by url
    pub fn get_by_url(&self, url: &str) -> StorageResult<Option<ArticleRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, url, title, body, fetched_at FROM articles WHERE url = ?1",
        )?;

        let article = stmt
            .query_row(params![url], |row| {
                Ok(ArticleRecord {
                    id: row.get(0)?,
                    url: row.get(1)?,
                    title: row.get(2)?,
                    body: row.get(3)?,
                    fetched_at: row.get(4)?,
                })
            })
            .optional()?;

        Ok(article)
    }

    /// Number of stored articles
    pub fn count(&self) -> StorageResult<i64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM articles", [], |row| row.get(0))?;
        Ok(count)
    }
}

impl std::fmt::Debug for ArticleStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArticleStore").finish_non_exhaustive()
    }
}
