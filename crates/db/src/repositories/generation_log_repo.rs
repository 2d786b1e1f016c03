//! Repository for the `generation_logs` table.

use promptforge_core::types::LogId;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::generation_log::{CreateGenerationLog, GenerationLog};

/// Column list for `generation_logs` queries.
const COLUMNS: &str = "\
    id, user_id, input_idea, input_model, input_style, \
    output_prompt, output_structured, generation_time_ms, tokens_used, \
    user_rating, is_successful, feedback_text, was_copied, was_saved, \
    created_at, rated_at";

/// CRUD plus feedback annotation for generation logs.
pub struct GenerationLogRepo;

impl GenerationLogRepo {
    /// Persist a completed generation. The UUIDv7 id is generated here and
    /// returned to the client as its feedback correlation token.
    pub async fn insert(
        pool: &PgPool,
        input: &CreateGenerationLog,
    ) -> Result<GenerationLog, sqlx::Error> {
        let query = format!(
            "INSERT INTO generation_logs \
             (id, user_id, input_idea, input_model, input_style, \
              output_prompt, output_structured, generation_time_ms, tokens_used) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GenerationLog>(&query)
            .bind(Uuid::now_v7())
            .bind(input.user_id)
            .bind(&input.input_idea)
            .bind(&input.input_model)
            .bind(&input.input_style)
            .bind(&input.output_prompt)
            .bind(Json(&input.output_structured))
            .bind(input.generation_time_ms)
            .bind(input.tokens_used)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: LogId,
    ) -> Result<Option<GenerationLog>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM generation_logs WHERE id = $1");
        sqlx::query_as::<_, GenerationLog>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Record a rating. A repeat call overwrites the previous rating and
    /// `rated_at` (documented overwrite semantics -- the log id is held
    /// only by the submitting client). Returns `None` for an unknown id.
    pub async fn set_rating(
        pool: &PgPool,
        id: LogId,
        rating: i16,
        is_successful: bool,
        feedback: Option<&str>,
    ) -> Result<Option<GenerationLog>, sqlx::Error> {
        let query = format!(
            "UPDATE generation_logs \
             SET user_rating = $2, is_successful = $3, feedback_text = $4, \
                 rated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GenerationLog>(&query)
            .bind(id)
            .bind(rating)
            .bind(is_successful)
            .bind(feedback)
            .fetch_optional(pool)
            .await
    }

    /// Flag that the user copied the generated prompt. Returns whether a
    /// row was updated.
    pub async fn mark_copied(pool: &PgPool, id: LogId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE generation_logs SET was_copied = TRUE WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Flag that the generation led to a saved prompt.
    pub async fn mark_saved(pool: &PgPool, id: LogId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE generation_logs SET was_saved = TRUE WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Number of log rows for a user. Used by tests to assert that rejected
    /// requests create no rows.
    pub async fn count_for_user(pool: &PgPool, user_id: i64) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM generation_logs WHERE user_id = $1")
                .bind(user_id)
                .fetch_one(pool)
                .await?;
        Ok(count)
    }
}
