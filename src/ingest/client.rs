use anyhow::{Context, Result};
use reqwest::Client;
use serde_json::Value;
use tokio::time::Duration;

/// HTTP client for the remote product catalog. Both sync reads hit the same
/// resource and vary only the `on_main` query flag.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    base_url: String,
    http: Client,
}

impl CatalogClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let http = Client::builder()
            .user_agent("shop-sync/0.1")
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    /// Fetches one catalog subset as parsed JSON. A transport error, timeout,
    /// non-2xx status, or malformed body is an error; the caller aborts the
    /// whole cycle on any of them.
    pub async fn fetch_products(&self, on_main: bool) -> Result<Value> {
        let resp = self
            .http
            .get(&self.base_url)
            .query(&[("on_main", if on_main { "true" } else { "false" })])
            .send()
            .await
            .with_context(|| format!("catalog request failed (on_main={on_main})"))?
            .error_for_status()
            .with_context(|| format!("catalog returned error status (on_main={on_main})"))?;

        resp.json::<Value>()
            .await
            .with_context(|| format!("malformed catalog body (on_main={on_main})"))
    }
}
