//! Route definition for quota usage statistics.

use axum::routing::get;
use axum::Router;

use crate::handlers::usage;
use crate::state::AppState;

/// Top-level usage route.
///
/// ```text
/// GET    /usage-stats     usage_stats
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/usage-stats", get(usage::usage_stats))
}
