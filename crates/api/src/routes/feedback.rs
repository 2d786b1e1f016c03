//! Route definitions for the feedback collector, mounted at `/feedback`.

use axum::routing::post;
use axum::Router;

use crate::handlers::feedback;
use crate::state::AppState;

/// Routes mounted at `/feedback`.
///
/// ```text
/// POST   /rate      rate
/// POST   /track     track
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/rate", post(feedback::rate))
        .route("/track", post(feedback::track))
}
