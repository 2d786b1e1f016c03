//! Handler for the usage-stats endpoint.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use promptforge_core::quota::{self, UsageSnapshot};
use promptforge_db::models::usage::UsageStats;
use promptforge_db::repositories::QuotaRepo;

use crate::error::AppResult;
use crate::middleware::identity::Identity;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/usage-stats
///
/// `remaining` is recomputed from the counter on every call, never stored.
pub async fn usage_stats(
    State(state): State<AppState>,
    identity: Identity,
) -> AppResult<impl IntoResponse> {
    let now = chrono::Utc::now();
    let period = quota::period_key(now);
    let (period_start, period_end) = quota::period_bounds(now);

    let used = QuotaRepo::get_used(&state.pool, identity.user_id, &period).await?;
    let snapshot = UsageSnapshot::new(identity.tier, used, state.config.free_monthly_limit);

    Ok(Json(DataResponse {
        data: UsageStats::new(snapshot, period_start, period_end),
    }))
}
