//! Environment helpers: centralized dotenv loading and ergonomic getters.
//! Call `init_env()` once early in the binary (or rely on lazy Once).
use std::str::FromStr;
use std::sync::Once;

static INIT: Once = Once::new();

/// Load .env exactly once. Safe to call many times.
pub fn init_env() {
    INIT.call_once(|| {
        let _ = dotenv::dotenv();
    });
}

/// Get optional env var (None if unset or empty).
pub fn env_opt(key: &str) -> Option<String> {
    init_env();
    match std::env::var(key) {
        Ok(v) if !v.trim().is_empty() => Some(v),
        _ => None,
    }
}

/// Get parsed value with default fallback.
pub fn env_parse<T>(key: &str, default: T) -> T
where
    T: FromStr + Clone,
{
    init_env();
    match std::env::var(key) {
        Ok(raw) => raw.parse::<T>().unwrap_or(default),
        Err(_) => default,
    }
}

/// Database DSN: an explicit `DATABASE_URL` wins; otherwise the DSN is
/// composed from the `DB_*` components with the stock compose-file defaults.
pub fn db_url() -> anyhow::Result<String> {
    init_env();
    if let Some(v) = env_opt("DATABASE_URL") {
        return Ok(v);
    }
    compose_db_url().ok_or_else(|| anyhow::anyhow!("could not compose database DSN from DB_*"))
}

fn compose_db_url() -> Option<String> {
    let user = env_opt("DB_USER").unwrap_or_else(|| "shop".into());
    let password = env_opt("DB_PASSWORD").unwrap_or_else(|| "shop_pass".into());
    let host = env_opt("DB_HOST").unwrap_or_else(|| "db".into());
    let port: u16 = env_parse("DB_PORT", 5432);
    let database = env_opt("DB_NAME").unwrap_or_else(|| "shop_db".into());

    // Credentials may contain reserved URL characters; build via `url::Url`
    // so username/password are percent-encoded safely.
    let mut out = url::Url::parse("postgresql://localhost").ok()?;
    out.set_username(&user).ok()?;
    out.set_password(Some(&password)).ok()?;
    out.set_host(Some(&host)).ok()?;
    out.set_port(Some(port)).ok()?;
    out.set_path(&format!("/{database}"));

    Some(out.to_string())
}
