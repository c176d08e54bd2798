use anyhow::Context;
use persistence::db::{DatabaseConfig, create_postgres_pool, run_migrations};
use sqlx::PgPool;
use std::env;

/// Initialize database connection pool from environment variables
///
/// Environment variables:
/// - DATABASE_URL: PostgreSQL connection string (required)
/// - DATABASE_MAX_CONNECTIONS: pool size (default: 5)
/// - DATABASE_MIGRATIONS_PATH: SQL migrations directory (default: "./migrations")
///
/// # Errors
/// Returns error if DATABASE_URL is not set, the connection fails or a
/// migration cannot be applied
pub async fn init_database() -> anyhow::Result<PgPool> {
    let db_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(5);
    let migrations_path =
        env::var("DATABASE_MIGRATIONS_PATH").unwrap_or_else(|_| "./migrations".to_string());

    let pool = create_postgres_pool(&DatabaseConfig::new(db_url, max_connections)).await?;
    run_migrations(&pool, &migrations_path).await?;
    Ok(pool)
}
