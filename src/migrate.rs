use sqlx::{Sqlite, SqlitePool, migrate::MigrateDatabase};
use sqlx_migrator::{Migrate, Plan};

use crate::Config;

/// Creates the database when missing and applies every pending migration.
#[tracing::instrument(skip(config))]
pub async fn migrate(config: &Config) -> anyhow::Result<()> {
    let url = &config.database.url;

    if !Sqlite::database_exists(url).await? {
        tracing::info!("Database does not exist, creating: {url}");
        Sqlite::create_database(url).await?;
    }

    let pool = SqlitePool::connect(url).await?;
    run_migrations(&pool).await?;
    pool.close().await;

    tracing::info!("Migrations completed successfully");

    Ok(())
}

/// Drops the database if it exists, then migrates from scratch.
#[tracing::instrument(skip(config))]
pub async fn reset(config: &Config) -> anyhow::Result<()> {
    let url = &config.database.url;

    if Sqlite::database_exists(url).await? {
        tracing::warn!("Dropping existing database: {url}");
        Sqlite::drop_database(url).await?;
    }

    migrate(config).await
}

pub async fn run_migrations(pool: &SqlitePool) -> anyhow::Result<()> {
    let mut conn = pool.acquire().await?;
    recipebox_db::migrator()?
        .run(&mut conn, &Plan::apply_all())
        .await?;

    Ok(())
}
