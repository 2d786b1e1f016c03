//! The quota ledger: per-user, per-period generation counters.
//!
//! The reserve operation is a single conditional upsert, so concurrent
//! generation calls from one user serialize through the row lock Postgres
//! takes on the counter row. Application code never reads a counter and
//! writes it back.

use promptforge_core::types::DbId;
use sqlx::PgPool;

/// Ledger operations on the `quota_counters` table.
pub struct QuotaRepo;

impl QuotaRepo {
    /// Atomically reserve one generation unit.
    ///
    /// * `limit = None` -- unlimited tier: the increment is unconditional.
    /// * `limit = Some(n)` -- the increment only applies while `used < n`.
    ///
    /// Returns the post-increment `used` value, or `None` when the limit
    /// was already reached (nothing was consumed). Two simultaneous calls
    /// with one unit remaining cannot both receive `Some`: the second
    /// waits on the row lock and re-evaluates the `WHERE` clause against
    /// the first one's committed increment.
    pub async fn check_and_reserve(
        pool: &PgPool,
        user_id: DbId,
        period_key: &str,
        limit: Option<i64>,
    ) -> Result<Option<i64>, sqlx::Error> {
        // A non-positive limit can never admit the first unit; the upsert
        // below would still insert `used = 1`, so reject it up front.
        if matches!(limit, Some(n) if n <= 0) {
            return Ok(None);
        }

        let reserved: Option<(i64,)> = sqlx::query_as(
            "INSERT INTO quota_counters (user_id, period_key, used) \
             VALUES ($1, $2, 1) \
             ON CONFLICT (user_id, period_key) DO UPDATE \
             SET used = quota_counters.used + 1, updated_at = NOW() \
             WHERE $3::bigint IS NULL OR quota_counters.used < $3 \
             RETURNING used",
        )
        .bind(user_id)
        .bind(period_key)
        .bind(limit)
        .fetch_optional(pool)
        .await?;

        Ok(reserved.map(|(used,)| used))
    }

    /// Compensating decrement after a provider failure, floored at zero.
    ///
    /// This is the only path that ever lowers `used`; a reservation whose
    /// provider call failed must not consume a unit of the user's monthly
    /// allowance.
    pub async fn refund(
        pool: &PgPool,
        user_id: DbId,
        period_key: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE quota_counters \
             SET used = GREATEST(used - 1, 0), updated_at = NOW() \
             WHERE user_id = $1 AND period_key = $2",
        )
        .bind(user_id)
        .bind(period_key)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Current consumption for a period. Zero when no counter row exists.
    pub async fn get_used(
        pool: &PgPool,
        user_id: DbId,
        period_key: &str,
    ) -> Result<i64, sqlx::Error> {
        let row: Option<(i64,)> = sqlx::query_as(
            "SELECT used FROM quota_counters WHERE user_id = $1 AND period_key = $2",
        )
        .bind(user_id)
        .bind(period_key)
        .fetch_optional(pool)
        .await?;

        Ok(row.map(|(used,)| used).unwrap_or(0))
    }
}
