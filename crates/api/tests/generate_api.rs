//! Integration tests for the generation pipeline endpoint.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{
    build_test_app, build_test_app_with, expect_status, get_as, post_json, post_json_as,
    FailingProvider, StubProvider, FREE_USER, PRO_USER, TEST_FREE_LIMIT,
};
use promptforge_db::repositories::GenerationLogRepo;
use serde_json::json;
use sqlx::PgPool;

fn generate_body() -> serde_json::Value {
    json!({
        "idea": "a cat exploring a garden at sunset",
        "model": "sora",
        "style": "cinematic",
    })
}

// ---------------------------------------------------------------------------
// Test: successful generation returns prompt, structured fields, and usage
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn generate_returns_prompt_structured_and_usage(pool: PgPool) {
    let app = build_test_app(pool.clone());

    let response = post_json_as(app, "/api/v1/generate", FREE_USER, generate_body()).await;
    let json = expect_status(response, StatusCode::OK).await;

    let data = &json["data"];
    assert!(data["prompt"]
        .as_str()
        .unwrap()
        .contains("a cat exploring a garden at sunset"));

    // The provider's vocabulary guesses come back canonicalized.
    assert_eq!(data["structured"]["subject"], "a cat");
    assert_eq!(data["structured"]["shotType"], "close_up");
    assert_eq!(data["structured"]["lighting"], "golden_hour");
    assert_eq!(data["structured"]["mood"], json!(["calm", "playful"]));

    // One unit consumed.
    assert_eq!(data["usage"]["used"], 1);
    assert_eq!(data["usage"]["limit"], TEST_FREE_LIMIT);
    assert_eq!(data["usage"]["remaining"], TEST_FREE_LIMIT - 1);
    assert_eq!(data["usage"]["isPro"], false);

    // And the log row exists under the returned id.
    let log_id: uuid::Uuid = data["logId"].as_str().unwrap().parse().unwrap();
    let log = GenerationLogRepo::find_by_id(&pool, log_id).await.unwrap();
    assert!(log.is_some());
    let log = log.unwrap();
    assert_eq!(log.user_id, Some(FREE_USER.0));
    assert_eq!(log.input_model, "sora");
    assert!(log.user_rating.is_none());
}

// ---------------------------------------------------------------------------
// Test: validation failures consume no quota and never reach the provider
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn invalid_model_is_rejected_without_side_effects(pool: PgPool) {
    let provider = Arc::new(StubProvider::default());
    let app = build_test_app_with(pool.clone(), provider.clone());

    let body = json!({
        "idea": "a cat",
        "model": "not-a-real-model",
        "style": "cinematic",
    });
    let response = post_json_as(app.clone(), "/api/v1/generate", FREE_USER, body).await;
    let json = expect_status(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");

    assert_eq!(provider.call_count(), 0);

    // Quota untouched.
    let response = get_as(app, "/api/v1/usage-stats", FREE_USER).await;
    let json = expect_status(response, StatusCode::OK).await;
    assert_eq!(json["data"]["used"], 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn blank_idea_is_rejected(pool: PgPool) {
    let app = build_test_app(pool);

    let body = json!({ "idea": "   ", "model": "sora", "style": "cinematic" });
    let response = post_json_as(app, "/api/v1/generate", FREE_USER, body).await;
    let json = expect_status(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn overlong_idea_is_rejected(pool: PgPool) {
    let app = build_test_app(pool);

    let body = json!({ "idea": "x".repeat(2001), "model": "sora", "style": "cinematic" });
    let response = post_json_as(app, "/api/v1/generate", FREE_USER, body).await;
    let json = expect_status(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// Test: missing gateway identity headers are rejected
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_identity_headers_return_401(pool: PgPool) {
    let app = build_test_app(pool);

    let response = post_json(app, "/api/v1/generate", generate_body()).await;
    let json = expect_status(response, StatusCode::UNAUTHORIZED).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
}

// ---------------------------------------------------------------------------
// Test: quota exhaustion returns 429 and spends no provider call
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn exhausted_quota_returns_429_without_provider_call(pool: PgPool) {
    let provider = Arc::new(StubProvider::default());
    let app = build_test_app_with(pool.clone(), provider.clone());

    // Burn the whole free allowance.
    for i in 1..=TEST_FREE_LIMIT {
        let response =
            post_json_as(app.clone(), "/api/v1/generate", FREE_USER, generate_body()).await;
        let json = expect_status(response, StatusCode::OK).await;
        assert_eq!(json["data"]["usage"]["used"], i);
    }

    // The next attempt is rejected before the provider is touched.
    let response = post_json_as(app, "/api/v1/generate", FREE_USER, generate_body()).await;
    let json = expect_status(response, StatusCode::TOO_MANY_REQUESTS).await;
    assert_eq!(json["code"], "GENERATION_LIMIT_REACHED");
    assert_eq!(json["usage"]["used"], TEST_FREE_LIMIT);
    assert_eq!(json["usage"]["remaining"], 0);

    assert_eq!(provider.call_count(), TEST_FREE_LIMIT as usize);

    // No orphan log row for the rejected attempt.
    let count = GenerationLogRepo::count_for_user(&pool, FREE_USER.0)
        .await
        .unwrap();
    assert_eq!(count, TEST_FREE_LIMIT);
}

// ---------------------------------------------------------------------------
// Test: provider failure refunds the reserved unit
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn provider_timeout_returns_502_and_refunds_quota(pool: PgPool) {
    let provider = Arc::new(FailingProvider::timeout());
    let app = build_test_app_with(pool.clone(), provider.clone());

    let response = post_json_as(app.clone(), "/api/v1/generate", FREE_USER, generate_body()).await;
    let json = expect_status(response, StatusCode::BAD_GATEWAY).await;
    assert_eq!(json["code"], "UPSTREAM_ERROR");
    assert_eq!(provider.call_count(), 1);

    // The reserved unit came back; the failed attempt cost nothing.
    let response = get_as(app, "/api/v1/usage-stats", FREE_USER).await;
    let json = expect_status(response, StatusCode::OK).await;
    assert_eq!(json["data"]["used"], 0);

    // And no log row was written for the failure.
    let count = GenerationLogRepo::count_for_user(&pool, FREE_USER.0)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn provider_error_status_returns_502(pool: PgPool) {
    let provider = Arc::new(FailingProvider::status_500());
    let app = build_test_app_with(pool, provider);

    let response = post_json_as(app, "/api/v1/generate", FREE_USER, generate_body()).await;
    let json = expect_status(response, StatusCode::BAD_GATEWAY).await;
    assert_eq!(json["code"], "UPSTREAM_ERROR");
}

// ---------------------------------------------------------------------------
// Test: pro tier is never limited
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn pro_tier_generates_past_the_free_limit(pool: PgPool) {
    let app = build_test_app(pool);

    for _ in 0..(TEST_FREE_LIMIT + 2) {
        let response =
            post_json_as(app.clone(), "/api/v1/generate", PRO_USER, generate_body()).await;
        let json = expect_status(response, StatusCode::OK).await;
        assert_eq!(json["data"]["usage"]["isPro"], true);
        assert_eq!(json["data"]["usage"]["limit"], -1);
        assert_eq!(json["data"]["usage"]["remaining"], -1);
    }
}

// ---------------------------------------------------------------------------
// Test: regeneration consumes a fresh unit and writes a fresh log row
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn regeneration_creates_a_new_log_row(pool: PgPool) {
    let app = build_test_app(pool.clone());

    let first = post_json_as(app.clone(), "/api/v1/generate", FREE_USER, generate_body()).await;
    let first = expect_status(first, StatusCode::OK).await;

    let second = post_json_as(app, "/api/v1/generate", FREE_USER, generate_body()).await;
    let second = expect_status(second, StatusCode::OK).await;

    assert_ne!(first["data"]["logId"], second["data"]["logId"]);
    assert_eq!(second["data"]["usage"]["used"], 2);

    let count = GenerationLogRepo::count_for_user(&pool, FREE_USER.0)
        .await
        .unwrap();
    assert_eq!(count, 2);
}
