//! Integration tests for the quota ledger.
//!
//! The counter is the one place where concurrent requests race, so these
//! tests hit the repository directly rather than going through the HTTP
//! layer.

use promptforge_db::repositories::QuotaRepo;
use sqlx::PgPool;

const USER: i64 = 42;
const PERIOD: &str = "2026-08";

// ---------------------------------------------------------------------------
// Test: reservations increment up to the limit, then stop
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn reserve_increments_until_limit(pool: PgPool) {
    let first = QuotaRepo::check_and_reserve(&pool, USER, PERIOD, Some(2))
        .await
        .unwrap();
    assert_eq!(first, Some(1));

    let second = QuotaRepo::check_and_reserve(&pool, USER, PERIOD, Some(2))
        .await
        .unwrap();
    assert_eq!(second, Some(2));

    // Limit reached: nothing is consumed.
    let third = QuotaRepo::check_and_reserve(&pool, USER, PERIOD, Some(2))
        .await
        .unwrap();
    assert_eq!(third, None);
    assert_eq!(QuotaRepo::get_used(&pool, USER, PERIOD).await.unwrap(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unlimited_reserve_never_rejects(pool: PgPool) {
    for expected in 1..=5 {
        let used = QuotaRepo::check_and_reserve(&pool, USER, PERIOD, None)
            .await
            .unwrap();
        assert_eq!(used, Some(expected));
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn zero_limit_rejects_without_creating_a_row(pool: PgPool) {
    let reserved = QuotaRepo::check_and_reserve(&pool, USER, PERIOD, Some(0))
        .await
        .unwrap();
    assert_eq!(reserved, None);
    assert_eq!(QuotaRepo::get_used(&pool, USER, PERIOD).await.unwrap(), 0);
}

// ---------------------------------------------------------------------------
// Test: two concurrent reservations cannot both take the last unit
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn concurrent_reservations_cannot_oversubscribe(pool: PgPool) {
    let (a, b) = tokio::join!(
        QuotaRepo::check_and_reserve(&pool, USER, PERIOD, Some(1)),
        QuotaRepo::check_and_reserve(&pool, USER, PERIOD, Some(1)),
    );
    let a = a.unwrap();
    let b = b.unwrap();

    // Exactly one winner, regardless of scheduling.
    assert!(
        matches!((a, b), (Some(1), None) | (None, Some(1))),
        "expected one winner, got {a:?} / {b:?}"
    );
    assert_eq!(QuotaRepo::get_used(&pool, USER, PERIOD).await.unwrap(), 1);
}

// ---------------------------------------------------------------------------
// Test: refund compensates a failed reservation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn refund_releases_a_reserved_unit(pool: PgPool) {
    QuotaRepo::check_and_reserve(&pool, USER, PERIOD, Some(5))
        .await
        .unwrap();
    assert_eq!(QuotaRepo::get_used(&pool, USER, PERIOD).await.unwrap(), 1);

    QuotaRepo::refund(&pool, USER, PERIOD).await.unwrap();
    assert_eq!(QuotaRepo::get_used(&pool, USER, PERIOD).await.unwrap(), 0);

    // Floored at zero: a spurious second refund cannot go negative.
    QuotaRepo::refund(&pool, USER, PERIOD).await.unwrap();
    assert_eq!(QuotaRepo::get_used(&pool, USER, PERIOD).await.unwrap(), 0);
}

// ---------------------------------------------------------------------------
// Test: counters are scoped per user and per period
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn counters_are_scoped_per_user_and_period(pool: PgPool) {
    QuotaRepo::check_and_reserve(&pool, USER, PERIOD, Some(2))
        .await
        .unwrap();

    // A different user in the same period starts fresh.
    assert_eq!(QuotaRepo::get_used(&pool, 43, PERIOD).await.unwrap(), 0);

    // The same user in the next period starts fresh: monthly reset is a
    // property of the key, not a scheduled job.
    let reserved = QuotaRepo::check_and_reserve(&pool, USER, "2026-09", Some(2))
        .await
        .unwrap();
    assert_eq!(reserved, Some(1));
    assert_eq!(QuotaRepo::get_used(&pool, USER, PERIOD).await.unwrap(), 1);
}
