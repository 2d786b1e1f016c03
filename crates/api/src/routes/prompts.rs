//! Route definitions for saved prompts, mounted at `/prompts`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::prompts;
use crate::state::AppState;

/// Routes mounted at `/prompts`.
///
/// ```text
/// POST   /          save_prompt
/// GET    /{id}      get_prompt
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(prompts::save_prompt))
        .route("/{id}", get(prompts::get_prompt))
}
