//! Saved-prompt row model and the save/read wire DTOs.

use promptforge_core::structured::StructuredPrompt;
use promptforge_core::types::{DbId, LogId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use ts_rs::TS;

/// A saved prompt artifact. Immutable snapshot of a finished draft: the
/// reassembled text plus an optional structured snapshot, never a live
/// reference to the draft.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Prompt {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub content: String,
    pub model: String,
    pub style: String,
    pub category: Option<String>,
    pub tags: Vec<String>,
    pub preview_image: Option<String>,
    pub owner_id: DbId,
    pub structured_snapshot: Option<Json<StructuredPrompt>>,
    pub is_premium: bool,
    pub is_published: bool,
    pub views_count: i64,
    pub favorites_count: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// Body for `POST /prompts` -- the explicit Save action on a finished draft.
#[derive(Debug, Clone, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SavePromptRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub content: String,
    pub model: String,
    pub style: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub structured: Option<StructuredPrompt>,
    /// When present, the source generation log is flagged `was_saved`.
    #[serde(default)]
    pub log_id: Option<LogId>,
}

/// Wire view of a saved prompt.
#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PromptView {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub content: String,
    pub model: String,
    pub style: String,
    pub category: Option<String>,
    pub tags: Vec<String>,
    pub owner_id: DbId,
    pub structured: Option<StructuredPrompt>,
    pub is_premium: bool,
    pub is_published: bool,
    pub created_at: Timestamp,
}

impl From<Prompt> for PromptView {
    fn from(row: Prompt) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            content: row.content,
            model: row.model,
            style: row.style,
            category: row.category,
            tags: row.tags,
            owner_id: row.owner_id,
            structured: row.structured_snapshot.map(|j| j.0),
            is_premium: row.is_premium,
            is_published: row.is_published,
            created_at: row.created_at,
        }
    }
}
