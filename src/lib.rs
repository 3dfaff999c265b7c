//! district-news - Cached district-level news lookup for Indian states
//!
//! A small HTTP service with one real job: given a `state` and `district`,
//! return recent news articles for that district. Results are cached for
//! 24 hours per (state, district) key so the upstream provider is queried
//! at most once a day per district.
//!
//! # Architecture
//!
//! - **config**: YAML service configuration (API key, TTL, paths)
//! - **languages**: static state → language-code table for the upstream query
//! - **store**: cache persistence behind the `NewsStore` trait (SQLite, in-memory)
//! - **provider**: upstream news API client behind the `NewsProvider` trait
//! - **service**: the lookup pipeline (validate, cache, fetch, persist)
//! - **server**: axum HTTP surface mapping errors to status codes
//! - **metrics**: prometheus counters exposed at `/metrics`

pub mod config;
pub mod error;
pub mod languages;
pub mod logging;
pub mod metrics;
pub mod provider;
pub mod server;
pub mod service;
pub mod store;

// Re-exports
pub use error::{NewsError, Result};
