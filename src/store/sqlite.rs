//! SQLite store implementation

use super::{CacheEntry, NewsStore};
use crate::Result;
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::Value;
use std::path::Path;
use tokio::sync::Mutex;

/// SQLite-backed cache store
///
/// One table keyed by the derived (state, district) key; articles are
/// stored as a JSON array string. The connection is serialized behind a
/// tokio Mutex since rusqlite connections are not Sync.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open or create the cache database
    pub fn open(path: &Path) -> Result<Self> {
        // Create parent directory if needed
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        tracing::info!(path = %path.display(), "Opening cache database");

        let conn = Connection::open(path)?;

        // Enable WAL mode for better concurrency
        conn.pragma_update(None, "journal_mode", "WAL")?;

        Self::init_schema(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory database (tests)
    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Initialize database schema
    fn init_schema(conn: &Connection) -> Result<()> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS news_cache (
                key TEXT PRIMARY KEY,
                timestamp INTEGER NOT NULL,
                articles TEXT NOT NULL
            );
            "#,
        )?;
        Ok(())
    }
}

#[async_trait]
impl NewsStore for SqliteStore {
    async fn get(&self, key: &str) -> Result<Option<CacheEntry>> {
        let conn = self.conn.lock().await;
        let row: Option<(i64, String)> = conn
            .query_row(
                "SELECT timestamp, articles FROM news_cache WHERE key = ?",
                params![key],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        match row {
            Some((timestamp, articles_json)) => {
                let articles: Vec<Value> = serde_json::from_str(&articles_json)?;
                Ok(Some(CacheEntry {
                    timestamp,
                    articles,
                }))
            }
            None => Ok(None),
        }
    }

    async fn put(&self, key: &str, entry: &CacheEntry) -> Result<()> {
        let articles_json = serde_json::to_string(&entry.articles)?;
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT OR REPLACE INTO news_cache (key, timestamp, articles) VALUES (?, ?, ?)",
            params![key, entry.timestamp, articles_json],
        )?;
        Ok(())
    }
}
