use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::{error, info};

use crate::error::AppError;

pub type DbPool = SqlitePool;

pub async fn init_pool(database_url: &str, max_connections: u32) -> Result<DbPool, AppError> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;
    Ok(pool)
}

pub async fn run_migrations(pool: &DbPool) -> Result<(), AppError> {
    if let Err(err) = sqlx::migrate!("./migrations").run(pool).await {
        error!("migration failed: {err:?}");
        return Err(AppError::Other(err.into()));
    }
    info!("database schema up to date");
    Ok(())
}

/// Opens the pool and brings the schema up to date.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<DbPool, AppError> {
    let pool = init_pool(database_url, max_connections).await?;
    run_migrations(&pool).await?;
    Ok(pool)
}
