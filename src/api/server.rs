// HTTP server setup using actix-web

use actix_web::middleware::{Compress, Logger};
use actix_web::{web, App, HttpServer};
use anyhow::{Context, Result};

use crate::api::routes;
use crate::database_ops::db::Db;
use crate::util::env as env_util;

pub struct ApiServer {
    pub host: String,
    pub port: u16,
}

impl ApiServer {
    /// Create server from environment variables.
    pub fn from_env() -> Result<Self> {
        env_util::init_env();

        let host = env_util::env_opt("API_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = env_util::env_opt("API_PORT")
            .unwrap_or_else(|| "5555".to_string())
            .parse()
            .context("Invalid API_PORT")?;

        Ok(Self { host, port })
    }

    /// Start the HTTP server; runs until shutdown.
    pub async fn run(self, db: Db) -> Result<()> {
        let bind_addr = format!("{}:{}", self.host, self.port);

        tracing::info!(host = %self.host, port = %self.port, "starting shop-sync API server");

        let db_data = web::Data::new(db);

        HttpServer::new(move || {
            App::new()
                .app_data(db_data.clone())
                .wrap(Logger::default())
                .wrap(Compress::default())
                .configure(routes::configure_routes)
        })
        .bind(&bind_addr)
        .with_context(|| format!("Failed to bind to {bind_addr}"))?
        .run()
        .await
        .context("HTTP server error")?;

        Ok(())
    }
}
