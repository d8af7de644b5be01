use anyhow::Result;
use std::time::Duration;
use tracing::{error, info};

use crate::database_ops::db::Db;
use crate::ingest::client::CatalogClient;
use crate::ingest::sync::sync;

/// Gates on store readiness, ensures the schema, then launches the perpetual
/// background sync task.
///
/// Each cycle sleeps the full interval after completion, whatever the
/// outcome, so the actual period is sync duration plus the interval. Failures
/// are logged and swallowed; the next tick retries from scratch.
pub async fn start_background_fetch(
    db: Db,
    client: CatalogClient,
    interval: Duration,
) -> Result<()> {
    info!("waiting for database...");
    db.wait_until_ready().await;
    db.init_schema().await?;

    tokio::spawn(async move {
        loop {
            if let Err(err) = sync(&db, &client).await {
                error!(error = %err, "sync cycle failed; retrying next interval");
            }
            tokio::time::sleep(interval).await;
        }
    });
    info!("background fetch task started");
    Ok(())
}
