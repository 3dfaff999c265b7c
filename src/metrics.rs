//! Prometheus metrics for the news service
//!
//! Counters for the lookup path, exposed at `GET /metrics`.

use lazy_static::lazy_static;
use prometheus::{
    register_counter_vec, register_int_counter, CounterVec, Encoder, IntCounter, TextEncoder,
};

lazy_static! {
    /// Counter: lookup requests by outcome (ok, invalid, upstream_error, internal_error)
    pub static ref LOOKUP_REQUESTS: CounterVec = register_counter_vec!(
        "district_news_lookup_requests_total",
        "Lookup requests by outcome",
        &["outcome"]
    )
    .expect("Failed to create lookup_requests metric");

    /// Counter: cache operations (hit/miss)
    pub static ref CACHE_OPERATIONS: CounterVec = register_counter_vec!(
        "district_news_cache_operations_total",
        "Cache operations by type",
        &["operation"]
    )
    .expect("Failed to create cache_operations metric");

    /// Counter: upstream fetches that failed validation
    pub static ref UPSTREAM_ERRORS: IntCounter = register_int_counter!(
        "district_news_upstream_errors_total",
        "Upstream provider errors"
    )
    .expect("Failed to create upstream_errors metric");
}

/// Record a lookup outcome
pub fn record_lookup(outcome: &str) {
    LOOKUP_REQUESTS.with_label_values(&[outcome]).inc();
}

/// Record cache hit
pub fn record_cache_hit() {
    CACHE_OPERATIONS.with_label_values(&["hit"]).inc();
}

/// Record cache miss
pub fn record_cache_miss() {
    CACHE_OPERATIONS.with_label_values(&["miss"]).inc();
}

/// Record an upstream provider error
pub fn record_upstream_error() {
    UPSTREAM_ERRORS.inc();
}

/// Render all registered metrics in the prometheus text format
pub fn gather() -> String {
    let encoder = TextEncoder::new();
    let families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&families, &mut buffer) {
        tracing::warn!(error = %e, "Failed to encode metrics");
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_increment() {
        record_cache_hit();
        record_cache_miss();
        record_upstream_error();
        record_lookup("ok");

        let text = gather();
        assert!(text.contains("district_news_cache_operations_total"));
        assert!(text.contains("district_news_lookup_requests_total"));
    }
}
