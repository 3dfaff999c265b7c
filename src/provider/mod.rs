//! Upstream news provider
//!
//! The `NewsProvider` trait is the seam between the lookup pipeline and
//! the outside world; `NewsDataClient` is the real newsdata.io-style
//! implementation. Tests swap in a scripted provider.

mod client;

pub use client::NewsDataClient;

use crate::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Source of article records for a (language, query) pair
#[async_trait]
pub trait NewsProvider: Send + Sync {
    /// Fetch articles in the given language matching the query
    ///
    /// Returns the provider's `results` array verbatim. Shape or status
    /// violations surface as [`crate::NewsError::Upstream`]; transport
    /// failures keep their own variants.
    async fn fetch(&self, language: &str, query: &str) -> Result<Vec<Value>>;
}
