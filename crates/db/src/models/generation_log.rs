//! Generation-log row model and the generate/feedback wire DTOs.
//!
//! Wire DTOs live next to the row they serve, kept separate from the row
//! struct so handlers stay small and the TS exports match the client's
//! expectations exactly.

use promptforge_core::quota::UsageSnapshot;
use promptforge_core::structured::StructuredPrompt;
use promptforge_core::types::{DbId, LogId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Row model
// ---------------------------------------------------------------------------

/// One persisted generation call.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct GenerationLog {
    pub id: LogId,
    pub user_id: Option<DbId>,
    pub input_idea: String,
    pub input_model: String,
    pub input_style: String,
    pub output_prompt: String,
    pub output_structured: Json<StructuredPrompt>,
    pub generation_time_ms: Option<i64>,
    pub tokens_used: Option<i64>,
    pub user_rating: Option<i16>,
    pub is_successful: Option<bool>,
    pub feedback_text: Option<String>,
    pub was_copied: bool,
    pub was_saved: bool,
    pub created_at: Timestamp,
    pub rated_at: Option<Timestamp>,
}

/// Fields written when a generation completes.
#[derive(Debug, Clone)]
pub struct CreateGenerationLog {
    pub user_id: Option<DbId>,
    pub input_idea: String,
    pub input_model: String,
    pub input_style: String,
    pub output_prompt: String,
    pub output_structured: StructuredPrompt,
    pub generation_time_ms: Option<i64>,
    pub tokens_used: Option<i64>,
}

// ---------------------------------------------------------------------------
// Wire DTOs
// ---------------------------------------------------------------------------

/// Body for `POST /generate`.
#[derive(Debug, Clone, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct GenerateRequest {
    pub idea: String,
    pub model: String,
    pub style: String,
}

/// Response for `POST /generate`.
#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct GenerateResponse {
    pub prompt: String,
    pub structured: StructuredPrompt,
    pub log_id: LogId,
    pub usage: UsageSnapshot,
}

/// Body for `POST /feedback/rate`.
///
/// `is_successful` is accepted for wire compatibility with older clients
/// but ignored: success is derived from the rating server-side.
#[derive(Debug, Clone, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct RateRequest {
    pub log_id: LogId,
    pub rating: i16,
    #[serde(default)]
    pub is_successful: Option<bool>,
    #[serde(default)]
    pub feedback: Option<String>,
}

/// Body for `POST /feedback/track`.
#[derive(Debug, Clone, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TrackRequest {
    pub log_id: LogId,
    pub action: TrackAction,
}

/// Quality signals a client can report without a rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum TrackAction {
    Copied,
    Saved,
}

/// Response for both feedback endpoints.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct FeedbackResponse {
    pub success: bool,
}
