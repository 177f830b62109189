use anyhow::Result;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;

/// Applies the connection PRAGMAs every pool relies on.
///
/// Foreign keys are off by default in SQLite and the cascading deletes of
/// recipe lines, favorites and cart entries depend on them.
async fn configure_pragmas(pool: &SqlitePool) -> Result<()> {
    for pragma in [
        "PRAGMA journal_mode = WAL",
        "PRAGMA busy_timeout = 5000",
        "PRAGMA synchronous = NORMAL",
        "PRAGMA cache_size = -20000",
        "PRAGMA foreign_keys = true",
        "PRAGMA temp_store = memory",
    ] {
        sqlx::query(pragma).execute(pool).await?;
    }

    Ok(())
}

/// Read-only pool serving queries and the shopping list aggregation.
pub async fn create_read_pool(database_url: &str, max_connections: u32) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)?.read_only(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    configure_pragmas(&pool).await?;

    tracing::info!(max_connections, "read-only pool created");

    Ok(pool)
}

/// Single connection pool, all writes go through it to avoid SQLITE_BUSY.
pub async fn create_write_pool(database_url: &str) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)?;

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;

    configure_pragmas(&pool).await?;

    tracing::info!("read-write pool created");

    Ok(pool)
}

/// Read-write pool for CLI commands and tests.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)?;

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    configure_pragmas(&pool).await?;

    Ok(pool)
}
