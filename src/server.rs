//! HTTP server for district news lookups
//!
//! Exposes the lookup pipeline over HTTP:
//!
//! - `GET /news?state=S&district=D` - Articles for a district (cached 24h)
//! - `GET /health` - Liveness check
//! - `GET /metrics` - Prometheus text exposition
//!
//! This layer owns the error-to-status mapping: validation failures are
//! 400, upstream shape/status violations are 502, and everything else
//! is a 500 whose details go to the log, never to the client.
//!
//! # Example
//!
//! ```no_run
//! use district_news::languages::LanguageTable;
//! use district_news::provider::NewsDataClient;
//! use district_news::server::NewsServer;
//! use district_news::service::NewsService;
//! use district_news::store::MemoryStore;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let provider = NewsDataClient::new("https://newsdata.io/api/1/news", "key", "in");
//!     let service = NewsService::new(
//!         Arc::new(MemoryStore::new()),
//!         Arc::new(provider),
//!         LanguageTable::new(),
//!         86_400_000,
//!     );
//!     NewsServer::new(service)
//!         .run("127.0.0.1:8380")
//!         .await
//!         .expect("Server failed");
//! }
//! ```

use crate::service::NewsService;
use crate::{metrics, NewsError};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;

/// Server error types
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Bind error: {0}")]
    Bind(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shared server state
struct AppState {
    service: NewsService,
}

/// HTTP server wrapping a [`NewsService`]
pub struct NewsServer {
    state: Arc<AppState>,
}

impl NewsServer {
    /// Create a server around the given service
    pub fn new(service: NewsService) -> Self {
        Self {
            state: Arc::new(AppState { service }),
        }
    }

    /// Build the router
    pub fn router(self) -> Router {
        Router::new()
            .route("/news", get(get_news))
            .route("/health", get(health))
            .route("/metrics", get(get_metrics))
            .with_state(self.state)
    }

    /// Run the server on the given address
    pub async fn run(self, addr: &str) -> Result<(), ServerError> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::Bind(e.to_string()))?;

        tracing::info!(addr, "News server listening");

        axum::serve(listener, self.router())
            .await
            .map_err(ServerError::Io)
    }
}

/// Query parameters for `/news`
///
/// Both fields are optional at the extractor level so an absent
/// parameter and a present-but-empty one fail validation the same way.
#[derive(Debug, Deserialize)]
pub struct NewsQuery {
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub district: Option<String>,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

// ============================================================================
// Handlers
// ============================================================================

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn get_metrics() -> impl IntoResponse {
    metrics::gather()
}

async fn get_news(
    State(state): State<Arc<AppState>>,
    Query(query): Query<NewsQuery>,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorResponse>)> {
    let state_name = query.state.as_deref().unwrap_or("");
    let district = query.district.as_deref().unwrap_or("");

    match state.service.lookup(state_name, district).await {
        Ok(articles) => {
            metrics::record_lookup("ok");
            Ok(Json(articles))
        }
        Err(e) => Err(error_response(e)),
    }
}

/// Translate a pipeline error into a client-safe HTTP response
fn error_response(err: NewsError) -> (StatusCode, Json<ErrorResponse>) {
    match err {
        NewsError::InvalidInput(reason) => {
            metrics::record_lookup("invalid");
            tracing::debug!(reason, "Rejected lookup request");
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "Missing 'state' or 'district' param.".to_string(),
                }),
            )
        }
        NewsError::Upstream(reason) => {
            metrics::record_lookup("upstream_error");
            tracing::warn!(reason, "Upstream provider failure");
            (
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse {
                    error: "News provider error.".to_string(),
                }),
            )
        }
        other => {
            metrics::record_lookup("internal_error");
            tracing::error!(error = %other, "Lookup failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Internal server error.".to_string(),
                }),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::languages::LanguageTable;
    use crate::provider::NewsProvider;
    use crate::store::MemoryStore;
    use crate::Result;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    struct FixedProvider {
        articles: Vec<Value>,
    }

    #[async_trait]
    impl NewsProvider for FixedProvider {
        async fn fetch(&self, _language: &str, _query: &str) -> Result<Vec<Value>> {
            Ok(self.articles.clone())
        }
    }

    fn test_app(articles: Vec<Value>) -> Router {
        let service = NewsService::new(
            Arc::new(MemoryStore::new()),
            Arc::new(FixedProvider { articles }),
            LanguageTable::new(),
            86_400_000,
        );
        NewsServer::new(service).router()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = test_app(vec![]);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_metrics_endpoint() {
        let app = test_app(vec![]);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/metrics")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_missing_params_is_400() {
        let app = test_app(vec![]);

        let response = app
            .oneshot(Request::builder().uri("/news").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Missing 'state' or 'district' param.");
    }

    #[tokio::test]
    async fn test_blank_params_is_400() {
        let app = test_app(vec![]);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/news?state=%20%20&district=Kochi")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_lookup_returns_articles_array() {
        let app = test_app(vec![json!({"title": "A"})]);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/news?state=Kerala&district=Kochi")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body, json!([{"title": "A"}]));
    }
}
