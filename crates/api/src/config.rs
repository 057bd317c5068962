use std::str::FromStr;

use anyhow::Context;

use crate::auth::jwt::AuthConfig;

/// Server configuration loaded from environment variables.
///
/// Everything except the auth issuer and audience has a default suitable
/// for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8080`).
    pub port: u16,
    /// SQLite connection URL.
    pub database_url: String,
    /// Upper bound on pooled database connections.
    pub db_max_connections: u32,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    /// A single `*` allows any origin.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Wipe both tables and insert demo rows on startup. Destructive; off
    /// unless explicitly enabled.
    pub reset_database: bool,
    /// Bearer-token verification settings.
    pub auth: AuthConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                          |
    /// |------------------------|----------------------------------|
    /// | `HOST`                 | `0.0.0.0`                        |
    /// | `PORT`                 | `8080`                           |
    /// | `DATABASE_URL`         | `sqlite://casting.db?mode=rwc`   |
    /// | `DB_MAX_CONNECTIONS`   | `5`                              |
    /// | `CORS_ORIGINS`         | `*`                              |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                             |
    /// | `RESET_DATABASE`       | `false`                          |
    ///
    /// See [`AuthConfig::from_env`] for the `AUTH_*` variables.
    pub fn from_env() -> anyhow::Result<Self> {
        let host = env_or("HOST", "0.0.0.0".to_string())?;
        let port = env_or("PORT", 8080u16)?;
        let database_url = env_or("DATABASE_URL", "sqlite://casting.db?mode=rwc".to_string())?;
        let db_max_connections = env_or("DB_MAX_CONNECTIONS", 5u32)?;

        let cors_origins: Vec<String> = env_or("CORS_ORIGINS", "*".to_string())?
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs = env_or("REQUEST_TIMEOUT_SECS", 30u64)?;
        let reset_database = env_or("RESET_DATABASE", false)?;
        let auth = AuthConfig::from_env()?;

        Ok(Self {
            host,
            port,
            database_url,
            db_max_connections,
            cors_origins,
            request_timeout_secs,
            reset_database,
            auth,
        })
    }
}

/// Read and parse `key`, falling back to `default` when it is unset.
pub(crate) fn env_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value: {raw:?}")),
        Err(_) => Ok(default),
    }
}
