//! Persistence layer: pool construction, migrations, row models, and
//! repositories. The quota ledger's atomic reservation lives in
//! [`repositories::QuotaRepo`] as a single conditional statement -- nothing
//! in this crate does read-then-write on shared counters.

pub mod models;
pub mod repositories;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Connection pool shared across all handlers.
pub type DbPool = PgPool;

/// Default maximum connections (override: `DATABASE_MAX_CONNECTIONS`).
const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Create the connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    let max_connections = std::env::var("DATABASE_MAX_CONNECTIONS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_MAX_CONNECTIONS);

    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Cheap connectivity probe used by the health endpoint and at startup.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
