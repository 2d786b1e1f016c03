//! Repository for the `prompts` table (saved artifacts).

use promptforge_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::prompt::{Prompt, SavePromptRequest};

/// Column list for `prompts` queries.
const COLUMNS: &str = "\
    id, title, description, content, model, style, category, tags, \
    preview_image, owner_id, structured_snapshot, is_premium, is_published, \
    views_count, favorites_count, created_at, updated_at, deleted_at";

/// Operations on saved prompts. Only the explicit Save action inserts here;
/// the generation pipeline never writes this table.
pub struct PromptRepo;

impl PromptRepo {
    pub async fn insert(
        pool: &PgPool,
        owner_id: DbId,
        input: &SavePromptRequest,
    ) -> Result<Prompt, sqlx::Error> {
        let query = format!(
            "INSERT INTO prompts \
             (title, description, content, model, style, category, tags, \
              owner_id, structured_snapshot) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Prompt>(&query)
            .bind(input.title.trim())
            .bind(input.description.as_deref().unwrap_or(""))
            .bind(&input.content)
            .bind(&input.model)
            .bind(&input.style)
            .bind(&input.category)
            .bind(&input.tags)
            .bind(owner_id)
            .bind(input.structured.as_ref().map(Json))
            .fetch_one(pool)
            .await
    }

    /// Fetch a prompt by id, excluding soft-deleted rows.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Prompt>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM prompts WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, Prompt>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
