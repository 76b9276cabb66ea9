use anyhow::{Context, Result, bail};
use std::env;

/// Which [`crate::repository::UrlStore`] implementation backs the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    MongoDb { uri: String, name: Option<String> },
    Memory,
}

/// Service configuration, read after `dotenv` has loaded `.env`.
///
/// - `HOST` bind address (default `127.0.0.1`)
/// - `PORT` listen port (default `3000`)
/// - `STORAGE` `mongodb` or `memory` (default `mongodb`)
/// - `DB_URI` MongoDB connection string, required for `STORAGE=mongodb`
/// - `DB_NAME` database name (default: the one in `DB_URI`, else `shorturl`)
/// - `STRICT_STATUS_CODES` answer client errors with 4xx instead of 200
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub storage: StorageBackend,
    /// When false, `invalid URL` and `shortcut not found` are sent with 200.
    pub strict_status_codes: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string());

        let port = match lookup("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .with_context(|| format!("PORT must be a port number, got {:?}", raw))?,
            None => 3000,
        };

        let storage = match lookup("STORAGE").as_deref().map(str::to_ascii_lowercase) {
            None => Self::mongodb_backend(&lookup)?,
            Some(kind) if kind == "mongodb" => Self::mongodb_backend(&lookup)?,
            Some(kind) if kind == "memory" => StorageBackend::Memory,
            Some(other) => bail!("STORAGE must be `mongodb` or `memory`, got {:?}", other),
        };

        let strict_status_codes = lookup("STRICT_STATUS_CODES")
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(false);

        Ok(Self {
            host,
            port,
            storage,
            strict_status_codes,
        })
    }

    fn mongodb_backend<F>(lookup: &F) -> Result<StorageBackend>
    where
        F: Fn(&str) -> Option<String>,
    {
        let uri = lookup("DB_URI").context("DB_URI must be set when STORAGE=mongodb")?;
        let name = lookup("DB_NAME").filter(|n| !n.is_empty());
        Ok(StorageBackend::MongoDb { uri, name })
    }
}
