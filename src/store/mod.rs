//! Cache persistence for news lookups
//!
//! A `CacheEntry` holds one upstream result set with its write
//! timestamp. The `NewsStore` trait abstracts where entries live so the
//! server can run against SQLite in production and an in-memory map in
//! tests. Entries are only overwritten, never deleted; staleness is a
//! read-time decision made by the caller via [`CacheEntry::is_fresh`].

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use crate::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One cached upstream result set for a (state, district) key
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CacheEntry {
    /// Milliseconds since epoch at write time
    pub timestamp: i64,
    /// Opaque article records exactly as the upstream returned them
    pub articles: Vec<Value>,
}

impl CacheEntry {
    /// Create an entry stamped with the current time
    pub fn new(articles: Vec<Value>) -> Self {
        Self {
            timestamp: chrono::Utc::now().timestamp_millis(),
            articles,
        }
    }

    /// Whether this entry is still fresh at `now_ms` for the given TTL
    pub fn is_fresh(&self, now_ms: i64, ttl_ms: i64) -> bool {
        now_ms - self.timestamp < ttl_ms
    }
}

/// Derive the cache key for a (state, district) pair
///
/// Lower-cases both parts, joins them with an underscore, then replaces
/// every space in the joined string with an underscore, so inputs that
/// differ only in casing map to the same key and multi-word names stay
/// a single token ("Tamil Nadu"/"Chennai" → "tamil_nadu_chennai").
pub fn cache_key(state: &str, district: &str) -> String {
    format!("{}_{}", state.to_lowercase(), district.to_lowercase()).replace(' ', "_")
}

/// Key-value persistence for cache entries
#[async_trait]
pub trait NewsStore: Send + Sync {
    /// Fetch the entry for a key, if any
    async fn get(&self, key: &str) -> Result<Option<CacheEntry>>;

    /// Write (or overwrite) the entry for a key
    async fn put(&self, key: &str, entry: &CacheEntry) -> Result<()>;
}
