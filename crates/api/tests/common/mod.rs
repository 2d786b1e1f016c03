//! Shared helpers for API integration tests.
//!
//! Builds the full production router (same middleware stack as `main.rs`)
//! over a `#[sqlx::test]`-provided pool, with the upstream AI provider
//! replaced by in-process stubs so no test touches the network.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use async_trait::async_trait;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use promptforge_api::config::ServerConfig;
use promptforge_api::router::build_app_router;
use promptforge_api::state::AppState;
use promptforge_provider::client::ProviderConfig;
use promptforge_provider::{
    PromptProvider, ProviderCompletion, ProviderError,
};
use promptforge_core::structured::StructuredGuess;

/// Free-tier monthly limit used across the tests. Kept tiny so exhaustion
/// tests stay fast.
pub const TEST_FREE_LIMIT: i64 = 2;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout. The provider settings are inert: every
/// test swaps in a stub, so the URL is never dialled.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        free_monthly_limit: TEST_FREE_LIMIT,
        provider: ProviderConfig {
            base_url: "http://provider.invalid".to_string(),
            api_key: "test-key".to_string(),
            completion_model: "test-model".to_string(),
            timeout_secs: 5,
        },
    }
}

// ---------------------------------------------------------------------------
// Provider stubs
// ---------------------------------------------------------------------------

/// Always succeeds with a canned completion, counting invocations so tests
/// can assert the upstream was (or was not) called.
#[derive(Default)]
pub struct StubProvider {
    pub calls: AtomicUsize,
}

impl StubProvider {
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PromptProvider for StubProvider {
    async fn invoke(
        &self,
        idea: &str,
        _model: &str,
        style: &str,
    ) -> Result<ProviderCompletion, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(ProviderCompletion {
            prompt_text: format!("A {style} rendition of: {idea}"),
            structured: StructuredGuess {
                subject: Some("a cat".to_string()),
                setting: Some("a sunlit garden".to_string()),
                action: Some("stalking through tall grass".to_string()),
                shot_type: Some("Close-Up".to_string()),
                lighting: Some("Golden Hour".to_string()),
                mood: Some(vec!["calm".to_string(), "playful".to_string()]),
                ..Default::default()
            },
            tokens_used: Some(128),
        })
    }
}

/// Always fails with the given error, counting invocations.
pub struct FailingProvider {
    pub calls: AtomicUsize,
    make_error: fn() -> ProviderError,
}

impl FailingProvider {
    pub fn timeout() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            make_error: || ProviderError::Timeout,
        }
    }

    pub fn status_500() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            make_error: || ProviderError::Status(500),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PromptProvider for FailingProvider {
    async fn invoke(
        &self,
        _idea: &str,
        _model: &str,
        _style: &str,
    ) -> Result<ProviderCompletion, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err((self.make_error)())
    }
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build the full application router with all middleware layers, a stub
/// provider, and the given database pool.
///
/// This goes through [`build_app_router`] so integration tests exercise the
/// same middleware stack (CORS, request ID, timeout, tracing, panic
/// recovery) that production uses.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with(pool, Arc::new(StubProvider::default()))
}

/// Like [`build_test_app`], but with an explicit provider so tests can
/// observe call counts or force failures.
pub fn build_test_app_with(pool: PgPool, provider: Arc<dyn PromptProvider>) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        provider,
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Identity headers for a free-tier test user.
pub const FREE_USER: (i64, &str) = (101, "free");
/// Identity headers for a pro-tier test user.
pub const PRO_USER: (i64, &str) = (202, "pro");

/// Send a GET request with no identity headers.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a GET request as the given user.
pub async fn get_as(app: Router, uri: &str, user: (i64, &str)) -> Response<Body> {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .header("x-user-id", user.0.to_string())
        .header("x-subscription-tier", user.1)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a POST request with a JSON body and no identity headers.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a POST request with a JSON body as the given user.
pub async fn post_json_as(
    app: Router,
    uri: &str,
    user: (i64, &str),
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .header("x-user-id", user.0.to_string())
        .header("x-subscription-tier", user.1)
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Assert a response has the expected status and return its parsed body.
pub async fn expect_status(
    response: Response<Body>,
    expected: StatusCode,
) -> serde_json::Value {
    let status = response.status();
    let json = body_json(response).await;
    assert_eq!(status, expected, "unexpected status, body: {json}");
    json
}
