pub mod feedback;
pub mod generate;
pub mod health;
pub mod prompts;
pub mod usage;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /generate            start a generation (POST)
///
/// /feedback/rate       rate a generation (POST)
/// /feedback/track      record copy/save signal (POST)
///
/// /usage-stats         current quota snapshot (GET)
///
/// /prompts             save a finished draft (POST)
/// /prompts/{id}        fetch a saved prompt (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // The generation pipeline.
        .merge(generate::router())
        // Feedback collector (ratings + copy/save signals).
        .nest("/feedback", feedback::router())
        // Quota snapshot for the current billing period.
        .merge(usage::router())
        // Saved prompt artifacts.
        .nest("/prompts", prompts::router())
}
