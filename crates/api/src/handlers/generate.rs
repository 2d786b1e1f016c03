//! Handler for the generation pipeline.
//!
//! Routes:
//! - `POST /generate` -- idea + model + style -> prompt + structured fields
//!
//! Order of operations matters here: validation (no side effects), then the
//! atomic quota reservation, then the provider call -- the single suspension
//! point -- with a compensating refund on failure, then the log insert.
//! A request rejected at any step before the provider call must consume no
//! quota and spend no external API call.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use promptforge_core::generation;
use promptforge_core::quota::{self, UsageSnapshot};
use promptforge_core::structured::StructuredPrompt;
use promptforge_db::models::generation_log::{
    CreateGenerationLog, GenerateRequest, GenerateResponse,
};
use promptforge_db::repositories::{GenerationLogRepo, QuotaRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::identity::Identity;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/generate
///
/// Regeneration is this same operation invoked again: it consumes a new
/// quota unit and creates a new log row every time -- the user is explicitly
/// asking for a new attempt.
pub async fn generate(
    State(state): State<AppState>,
    identity: Identity,
    Json(input): Json<GenerateRequest>,
) -> AppResult<impl IntoResponse> {
    generation::validate_idea(&input.idea).map_err(AppError::Core)?;
    generation::validate_model(&input.model).map_err(AppError::Core)?;
    generation::validate_style(&input.style).map_err(AppError::Core)?;

    let period = quota::period_key(chrono::Utc::now());
    let limit = quota::monthly_limit(identity.tier, state.config.free_monthly_limit);

    // Atomic reserve: two simultaneous calls with one unit left cannot both
    // pass. On rejection the provider is never invoked.
    let reserved =
        QuotaRepo::check_and_reserve(&state.pool, identity.user_id, &period, limit).await?;
    let Some(used) = reserved else {
        let used = QuotaRepo::get_used(&state.pool, identity.user_id, &period).await?;
        return Err(AppError::QuotaExceeded(UsageSnapshot::new(
            identity.tier,
            used,
            state.config.free_monthly_limit,
        )));
    };

    let started = std::time::Instant::now();
    let completion = match state
        .provider
        .invoke(input.idea.trim(), &input.model, &input.style)
        .await
    {
        Ok(completion) => completion,
        Err(provider_err) => {
            // The reserved unit must not be silently consumed by a failed
            // or timed-out provider call.
            if let Err(refund_err) =
                QuotaRepo::refund(&state.pool, identity.user_id, &period).await
            {
                tracing::error!(
                    error = %refund_err,
                    user_id = identity.user_id,
                    "Failed to refund quota after provider failure"
                );
            }
            return Err(AppError::Upstream(provider_err));
        }
    };
    let generation_time_ms = started.elapsed().as_millis() as i64;

    let structured = StructuredPrompt::from_guess(completion.structured);

    let log = GenerationLogRepo::insert(
        &state.pool,
        &CreateGenerationLog {
            user_id: Some(identity.user_id),
            input_idea: input.idea.trim().to_string(),
            input_model: input.model.clone(),
            input_style: input.style.clone(),
            output_prompt: completion.prompt_text.clone(),
            output_structured: structured.clone(),
            generation_time_ms: Some(generation_time_ms),
            tokens_used: completion.tokens_used,
        },
    )
    .await?;

    tracing::info!(
        user_id = identity.user_id,
        log_id = %log.id,
        generation_time_ms,
        tokens = ?completion.tokens_used,
        "Generation complete"
    );

    Ok(Json(DataResponse {
        data: GenerateResponse {
            prompt: completion.prompt_text,
            structured,
            log_id: log.id,
            usage: UsageSnapshot::new(identity.tier, used, state.config.free_monthly_limit),
        },
    }))
}
