use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};

pub mod alerts;
pub mod queries;
pub mod telemetry;
pub mod vehicles;

pub type DbPool = Pool<Postgres>;

pub async fn init_pool(database_url: &str) -> Result<DbPool> {
    let pool = PgPoolOptions::new()
        .max_connections(50)
        .connect(database_url)
        .await?;
    Ok(pool)
}

/// Creates the three tables on first start.
pub async fn init_schema(pool: &DbPool) -> Result<()> {
    sqlx::query(queries::CREATE_VEHICLES_TABLE).execute(pool).await?;
    sqlx::query(queries::CREATE_TELEMETRY_TABLE).execute(pool).await?;
    sqlx::query(queries::CREATE_ALERTS_TABLE).execute(pool).await?;
    Ok(())
}
