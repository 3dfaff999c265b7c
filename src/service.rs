//! The lookup pipeline
//!
//! `NewsService` is the whole of the business logic: validate the
//! (state, district) pair, serve from the cache while the entry is
//! inside its TTL, otherwise fetch from the provider in the state's
//! language and persist what came back. It knows nothing about HTTP;
//! the server layer maps its errors to status codes.
//!
//! Two concurrent misses for the same key will both fetch and both
//! write; last writer wins, which is fine for a daily news cache.

use crate::languages::LanguageTable;
use crate::provider::NewsProvider;
use crate::store::{cache_key, CacheEntry, NewsStore};
use crate::{metrics, NewsError, Result};
use serde_json::Value;
use std::sync::Arc;

/// Cached news lookup over an injected store and provider
pub struct NewsService {
    store: Arc<dyn NewsStore>,
    provider: Arc<dyn NewsProvider>,
    languages: LanguageTable,
    ttl_ms: i64,
}

impl NewsService {
    /// Create a service with the given collaborators and TTL
    pub fn new(
        store: Arc<dyn NewsStore>,
        provider: Arc<dyn NewsProvider>,
        languages: LanguageTable,
        ttl_ms: i64,
    ) -> Self {
        Self {
            store,
            provider,
            languages,
            ttl_ms,
        }
    }

    /// Look up articles for a district, consulting the cache first
    ///
    /// Inputs are trimmed; either being blank is `InvalidInput` and
    /// nothing external is touched. A fresh cache entry short-circuits
    /// the provider entirely. On a miss (or stale entry) the provider
    /// is queried once and the result overwrites the cache entry.
    pub async fn lookup(&self, state: &str, district: &str) -> Result<Vec<Value>> {
        let state = state.trim();
        let district = district.trim();

        if state.is_empty() || district.is_empty() {
            return Err(NewsError::InvalidInput(
                "blank 'state' or 'district'".to_string(),
            ));
        }

        let key = cache_key(state, district);
        let now = chrono::Utc::now().timestamp_millis();

        if let Some(entry) = self.store.get(&key).await? {
            if entry.is_fresh(now, self.ttl_ms) {
                metrics::record_cache_hit();
                tracing::debug!(key, age_ms = now - entry.timestamp, "Cache hit");
                return Ok(entry.articles);
            }
            tracing::debug!(key, age_ms = now - entry.timestamp, "Cache entry stale");
        }
        metrics::record_cache_miss();

        // Language resolution uses the original-cased state name
        let language = self.languages.resolve(state);

        let articles = match self.provider.fetch(language, district).await {
            Ok(articles) => articles,
            Err(e) => {
                if matches!(e, NewsError::Upstream(_)) {
                    metrics::record_upstream_error();
                }
                return Err(e);
            }
        };

        let entry = CacheEntry::new(articles);
        self.store.put(&key, &entry).await?;

        tracing::info!(
            key,
            language,
            articles = entry.articles.len(),
            "Cached fresh articles"
        );

        Ok(entry.articles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Scripted provider that records calls and their arguments
    struct ScriptedProvider {
        response: Result<Vec<Value>>,
        calls: AtomicUsize,
        last_language: std::sync::Mutex<Option<String>>,
    }

    impl ScriptedProvider {
        fn ok(articles: Vec<Value>) -> Self {
            Self {
                response: Ok(articles),
                calls: AtomicUsize::new(0),
                last_language: std::sync::Mutex::new(None),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                response: Err(NewsError::Upstream(message.to_string())),
                calls: AtomicUsize::new(0),
                last_language: std::sync::Mutex::new(None),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl NewsProvider for ScriptedProvider {
        async fn fetch(&self, language: &str, _query: &str) -> Result<Vec<Value>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_language.lock().unwrap() = Some(language.to_string());
            match &self.response {
                Ok(articles) => Ok(articles.clone()),
                Err(NewsError::Upstream(msg)) => Err(NewsError::Upstream(msg.clone())),
                Err(_) => unreachable!(),
            }
        }
    }

    const DAY_MS: i64 = 86_400_000;

    fn service_with(
        store: Arc<MemoryStore>,
        provider: Arc<ScriptedProvider>,
    ) -> NewsService {
        NewsService::new(store, provider, LanguageTable::new(), DAY_MS)
    }

    #[tokio::test]
    async fn test_blank_input_is_rejected_before_any_io() {
        let store = Arc::new(MemoryStore::new());
        let provider = Arc::new(ScriptedProvider::ok(vec![]));
        let service = service_with(store.clone(), provider.clone());

        for (state, district) in [("", "Kochi"), ("Kerala", ""), ("   ", "Kochi"), ("Kerala", "\t")]
        {
            let err = service.lookup(state, district).await.unwrap_err();
            assert!(matches!(err, NewsError::InvalidInput(_)));
        }

        assert_eq!(provider.call_count(), 0);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_miss_fetches_and_writes_cache() {
        let store = Arc::new(MemoryStore::new());
        let provider = Arc::new(ScriptedProvider::ok(vec![json!({"title": "A"})]));
        let service = service_with(store.clone(), provider.clone());

        let articles = service.lookup("Kerala", "Kochi").await.unwrap();
        assert_eq!(articles, vec![json!({"title": "A"})]);
        assert_eq!(provider.call_count(), 1);

        let cached = store.get("kerala_kochi").await.unwrap().unwrap();
        assert_eq!(cached.articles, articles);
    }

    #[tokio::test]
    async fn test_fresh_hit_skips_provider() {
        let store = Arc::new(MemoryStore::new());
        let provider = Arc::new(ScriptedProvider::ok(vec![json!({"title": "fresh"})]));
        let service = service_with(store.clone(), provider.clone());

        let now = chrono::Utc::now().timestamp_millis();
        let entry = CacheEntry {
            timestamp: now - 1000,
            articles: vec![json!({"title": "cached"})],
        };
        store.put("kerala_kochi", &entry).await.unwrap();

        let articles = service.lookup("Kerala", "Kochi").await.unwrap();
        assert_eq!(articles, vec![json!({"title": "cached"})]);
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_stale_entry_triggers_refetch() {
        let store = Arc::new(MemoryStore::new());
        let provider = Arc::new(ScriptedProvider::ok(vec![json!({"title": "new"})]));
        let service = service_with(store.clone(), provider.clone());

        let now = chrono::Utc::now().timestamp_millis();
        let entry = CacheEntry {
            timestamp: now - 90_000_000,
            articles: vec![json!({"title": "stale"})],
        };
        store.put("kerala_kochi", &entry).await.unwrap();

        let articles = service.lookup("Kerala", "Kochi").await.unwrap();
        assert_eq!(articles, vec![json!({"title": "new"})]);
        assert_eq!(provider.call_count(), 1);

        let cached = store.get("kerala_kochi").await.unwrap().unwrap();
        assert_eq!(cached.articles, articles);
        assert!(cached.timestamp >= now);
    }

    #[tokio::test]
    async fn test_case_and_whitespace_share_a_key() {
        let store = Arc::new(MemoryStore::new());
        let provider = Arc::new(ScriptedProvider::ok(vec![json!({"title": "A"})]));
        let service = service_with(store.clone(), provider.clone());

        service.lookup("  Kerala ", "Kochi").await.unwrap();
        service.lookup("KERALA", " kochi  ").await.unwrap();

        // Second call was served from the entry the first one wrote
        assert_eq!(provider.call_count(), 1);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_upstream_failure_leaves_cache_untouched() {
        let store = Arc::new(MemoryStore::new());
        let provider = Arc::new(ScriptedProvider::failing("status was \"error\""));
        let service = service_with(store.clone(), provider.clone());

        let err = service.lookup("Kerala", "Kochi").await.unwrap_err();
        assert!(matches!(err, NewsError::Upstream(_)));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_language_resolution_for_known_and_unknown_states() {
        let store = Arc::new(MemoryStore::new());
        let provider = Arc::new(ScriptedProvider::ok(vec![]));
        let service = service_with(store, provider.clone());

        service.lookup("Kerala", "Kochi").await.unwrap();
        assert_eq!(
            provider.last_language.lock().unwrap().as_deref(),
            Some("ml")
        );

        service.lookup("Wakanda", "Birnin Zana").await.unwrap();
        assert_eq!(
            provider.last_language.lock().unwrap().as_deref(),
            Some("en")
        );
    }
}
