use std::env;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result, bail};
use tracing::info;

/// Placeholder JWT secrets that MUST NOT be used.
const PLACEHOLDER_SECRETS: &[&str] = &["change-me-to-a-random-string", "dev-secret-change-me"];

pub struct Config {
    pub jwt_secret: String,
    pub db_path: PathBuf,
    pub host: String,
    pub port: u16,
    pub storage_dir: PathBuf,
    /// Base URL clients use to reach this server; object URLs are built on it.
    pub public_url: String,
}

impl Config {
    pub fn load() -> Result<Self> {
        let jwt_secret = env::var("FOUNDIT_JWT_SECRET").unwrap_or_default();
        if jwt_secret.is_empty() || PLACEHOLDER_SECRETS.contains(&jwt_secret.as_str()) {
            bail!("FOUNDIT_JWT_SECRET is unset or still a placeholder; set it in .env and restart");
        }

        let host: String = try_load("FOUNDIT_HOST", "0.0.0.0")?;
        let port: u16 = try_load("FOUNDIT_PORT", "3000")?;
        let public_url = try_load("FOUNDIT_PUBLIC_URL", &format!("http://localhost:{}", port))?;

        Ok(Self {
            jwt_secret,
            db_path: try_load::<String>("FOUNDIT_DB_PATH", "foundit.db")?.into(),
            host,
            port,
            storage_dir: try_load::<String>("FOUNDIT_STORAGE_DIR", "./object-storage")?.into(),
            public_url,
        })
    }
}

fn try_load<T: FromStr>(key: &str, default: &str) -> Result<T>
where
    T::Err: Display,
{
    let raw = env::var(key).unwrap_or_else(|_| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });
    raw.parse()
        .map_err(|e| anyhow::anyhow!("{e}"))
        .with_context(|| format!("invalid {key} value '{raw}'"))
}
