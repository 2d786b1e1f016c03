//! Handler for saving finished prompts.
//!
//! Routes:
//! - `POST /prompts`      -- explicit Save of a finished draft
//! - `GET  /prompts/{id}` -- fetch a saved prompt

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

use promptforge_core::draft::MIN_TITLE_LENGTH;
use promptforge_core::error::CoreError;
use promptforge_core::types::DbId;
use promptforge_db::models::prompt::{PromptView, SavePromptRequest};
use promptforge_db::repositories::{GenerationLogRepo, PromptRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::identity::Identity;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/prompts
///
/// The generation pipeline never writes this table; only this explicit
/// user action does. The trimmed title length is the only hard validation,
/// mirroring the draft state machine's save guard.
pub async fn save_prompt(
    State(state): State<AppState>,
    identity: Identity,
    Json(input): Json<SavePromptRequest>,
) -> AppResult<impl IntoResponse> {
    if input.title.trim().chars().count() < MIN_TITLE_LENGTH {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Title must be at least {MIN_TITLE_LENGTH} characters"
        ))));
    }
    if input.content.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Prompt content must not be empty".to_string(),
        )));
    }

    let prompt = PromptRepo::insert(&state.pool, identity.user_id, &input).await?;

    // Close the loop on the source generation, when the client tells us
    // which one this came from. An already-deleted log is not an error.
    if let Some(log_id) = input.log_id {
        if !GenerationLogRepo::mark_saved(&state.pool, log_id).await? {
            tracing::debug!(%log_id, "Save referenced an unknown generation log");
        }
    }

    tracing::info!(user_id = identity.user_id, prompt_id = prompt.id, "Prompt saved");

    Ok(Json(DataResponse {
        data: PromptView::from(prompt),
    }))
}

/// GET /api/v1/prompts/{id}
pub async fn get_prompt(
    State(state): State<AppState>,
    _identity: Identity,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let prompt = PromptRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Prompt",
            id: id.to_string(),
        }))?;

    Ok(Json(DataResponse {
        data: PromptView::from(prompt),
    }))
}
