//! Runtime configuration read from environment variables.

use anyhow::{Context, Result};
use axum::http::HeaderValue;
use std::net::SocketAddr;
use tracing::warn;

pub const DEFAULT_DATABASE_URL: &str = "sqlite:project.db";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// SQLite database URL (`DATABASE_URL`)
    pub database_url: String,
    /// Connection pool size (`DATABASE_MAX_CONNECTIONS`)
    pub database_max_connections: u32,
    /// Listen address (`BIND_ADDR`)
    pub bind_addr: SocketAddr,
    /// Origin allowed by the CORS layer (`CORS_ALLOW_ORIGIN`); no CORS layer when unset
    pub cors_allow_origin: Option<HeaderValue>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            database_max_connections: DEFAULT_MAX_CONNECTIONS,
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 5000)),
            cors_allow_origin: None,
        }
    }
}

impl AppConfig {
    /// Load the configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load the configuration through `lookup`, falling back to defaults for
    /// unset variables
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").unwrap_or_else(|| {
            warn!("DATABASE_URL not set, using {}", DEFAULT_DATABASE_URL);
            DEFAULT_DATABASE_URL.to_string()
        });

        let database_max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(raw) => {
                let value: u32 = raw
                    .parse()
                    .with_context(|| format!("Invalid DATABASE_MAX_CONNECTIONS: {}", raw))?;
                if value == 0 {
                    anyhow::bail!("DATABASE_MAX_CONNECTIONS must be at least 1");
                }
                value
            }
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let bind_addr = lookup("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr: SocketAddr = bind_addr
            .parse()
            .with_context(|| format!("Invalid BIND_ADDR: {}", bind_addr))?;

        let cors_allow_origin = lookup("CORS_ALLOW_ORIGIN")
            .map(|origin| {
                origin
                    .parse::<HeaderValue>()
                    .with_context(|| format!("Invalid CORS_ALLOW_ORIGIN: {}", origin))
            })
            .transpose()?;

        Ok(Self {
            database_url,
            database_max_connections,
            bind_addr,
            cors_allow_origin,
        })
    }
}
