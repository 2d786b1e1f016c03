//! Handlers for the feedback collector.
//!
//! Routes:
//! - `POST /feedback/rate`  -- rate a generation 1..5
//! - `POST /feedback/track` -- record copy/save quality signals
//!
//! Feedback touches only the generation-log row; it never affects quota or
//! saved prompts.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use promptforge_core::error::CoreError;
use promptforge_core::feedback;
use promptforge_db::models::generation_log::{
    FeedbackResponse, RateRequest, TrackAction, TrackRequest,
};
use promptforge_db::repositories::GenerationLogRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/feedback/rate
///
/// `is_successful` is derived server-side (`rating >= 3`); a repeat call
/// overwrites the previous rating and `rated_at`.
pub async fn rate(
    State(state): State<AppState>,
    Json(input): Json<RateRequest>,
) -> AppResult<impl IntoResponse> {
    feedback::validate_rating(input.rating).map_err(AppError::Core)?;
    if let Some(ref text) = input.feedback {
        feedback::validate_feedback(text).map_err(AppError::Core)?;
    }

    let is_successful = feedback::is_successful(input.rating);

    let updated = GenerationLogRepo::set_rating(
        &state.pool,
        input.log_id,
        input.rating,
        is_successful,
        input.feedback.as_deref(),
    )
    .await?;

    if updated.is_none() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "GenerationLog",
            id: input.log_id.to_string(),
        }));
    }

    tracing::debug!(log_id = %input.log_id, rating = input.rating, "Rating recorded");

    Ok(Json(DataResponse {
        data: FeedbackResponse { success: true },
    }))
}

/// POST /api/v1/feedback/track
pub async fn track(
    State(state): State<AppState>,
    Json(input): Json<TrackRequest>,
) -> AppResult<impl IntoResponse> {
    let updated = match input.action {
        TrackAction::Copied => GenerationLogRepo::mark_copied(&state.pool, input.log_id).await?,
        TrackAction::Saved => GenerationLogRepo::mark_saved(&state.pool, input.log_id).await?,
    };

    if !updated {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "GenerationLog",
            id: input.log_id.to_string(),
        }));
    }

    Ok(Json(DataResponse {
        data: FeedbackResponse { success: true },
    }))
}
