//! Route definition for the generation pipeline.

use axum::routing::post;
use axum::Router;

use crate::handlers::generate;
use crate::state::AppState;

/// Top-level generation route.
///
/// ```text
/// POST   /generate     generate
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/generate", post(generate::generate))
}
