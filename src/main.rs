// shop-sync service binary: background catalog fetcher + /info summary API

use anyhow::Result;
use std::time::Duration;

use shop_sync::api::ApiServer;
use shop_sync::database_ops::db::Db;
use shop_sync::ingest::client::CatalogClient;
use shop_sync::ingest::scheduler;
use shop_sync::util::env as env_util;

const DEFAULT_PRODUCTS_API_URL: &str = "https://bot-igor.ru/api/products";

#[actix_web::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,sqlx=warn".into()),
        )
        .init();

    env_util::init_env();

    let database_url = env_util::db_url()?;
    let max_connections: u32 = env_util::env_parse("DB_MAX_CONNS", 10u32);
    let db = Db::connect_lazy(&database_url, max_connections)?;

    let api_url = env_util::env_opt("PRODUCTS_API_URL")
        .unwrap_or_else(|| DEFAULT_PRODUCTS_API_URL.to_string());
    let client = CatalogClient::new(&api_url)?;
    let interval = Duration::from_secs(env_util::env_parse("FETCH_INTERVAL_SECONDS", 300u64));

    // Blocks until the store answers, ensures the schema, then spawns the
    // perpetual sync loop.
    scheduler::start_background_fetch(db.clone(), client, interval).await?;

    let server = ApiServer::from_env()?;
    server.run(db).await
}
