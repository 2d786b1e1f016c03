//! Caller identity extractor.
//!
//! Authentication happens upstream (the session gateway); by the time a
//! request reaches this service the gateway has attached the caller's id
//! and subscription tier as trusted headers. This service never
//! authenticates -- it only refuses requests the gateway left unannotated.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use promptforge_core::error::CoreError;
use promptforge_core::quota::Tier;
use promptforge_core::types::DbId;

use crate::error::AppError;
use crate::state::AppState;

/// Header carrying the authenticated user id.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Header carrying the user's subscription tier (`free` | `pro`).
pub const TIER_HEADER: &str = "x-subscription-tier";

/// Authenticated caller, extracted from gateway-supplied headers.
///
/// Use as an extractor parameter in any handler that needs the caller:
///
/// ```ignore
/// async fn my_handler(identity: Identity) -> AppResult<Json<()>> {
///     tracing::info!(user_id = identity.user_id, tier = identity.tier.as_str(), "handling");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Identity {
    pub user_id: DbId,
    pub tier: Tier,
}

impl FromRequestParts<AppState> for Identity {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user_id: DbId = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(format!(
                    "Missing or invalid {USER_ID_HEADER} header"
                )))
            })?;

        let tier = parts
            .headers
            .get(TIER_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(Tier::parse)
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(format!(
                    "Missing or invalid {TIER_HEADER} header"
                )))
            })?;

        Ok(Identity { user_id, tier })
    }
}
