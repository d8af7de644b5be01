use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;
use tracing::info;

#[derive(Clone)]
pub struct Db {
    pub pool: PgPool,
}

impl Db {
    /// Builds the pool without touching the network; readiness is checked
    /// separately so we can start before the database container does.
    pub fn connect_lazy(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(10))
            .connect_lazy(database_url)?;
        Ok(Self { pool })
    }

    /// Blocks until the store answers a trivial query, polling every second,
    /// indefinitely.
    pub async fn wait_until_ready(&self) {
        loop {
            match sqlx::query_scalar::<_, i32>("SELECT 1")
                .fetch_one(&self.pool)
                .await
            {
                Ok(_) => {
                    info!("database is available");
                    return;
                }
                Err(_) => {
                    info!("database unavailable, retrying in 1s...");
                    tokio::time::sleep(Duration::from_secs(1)).await;
                }
            }
        }
    }

    /// Creates missing tables. Idempotent; never alters existing tables.
    pub async fn init_schema(&self) -> Result<()> {
        sqlx::raw_sql(
            "CREATE TABLE IF NOT EXISTS categories (
                id   BIGSERIAL PRIMARY KEY,
                name TEXT UNIQUE NOT NULL
             );
             CREATE TABLE IF NOT EXISTS products (
                id          BIGSERIAL PRIMARY KEY,
                name        TEXT NOT NULL,
                price       DOUBLE PRECISION NOT NULL,
                image_url   TEXT,
                on_main     BOOLEAN NOT NULL DEFAULT FALSE,
                category_id BIGINT NOT NULL
                            REFERENCES categories(id) ON DELETE CASCADE
             );",
        )
        .execute(&self.pool)
        .await?;
        info!("database schema created");
        Ok(())
    }
}
