//! Runtime configuration read from environment variables (after `.env` is loaded).

use crate::error::ConfigError;
use axum::http::HeaderValue;
use std::net::SocketAddr;
use std::time::Duration;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:4000";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PoolSettings {
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 5,
            acquire_timeout: Duration::from_secs(5),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    /// `DATABASE_URL`. Required unless `in_memory` is set.
    pub database_url: Option<String>,
    /// Explicit opt-in to a non-persistent store when no database is configured.
    pub in_memory: bool,
    pub pool: PoolSettings,
    pub bind_addr: SocketAddr,
    /// `FRONTEND_URL`: the one origin allowed by CORS.
    pub frontend_origin: Option<HeaderValue>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any variable source. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let defaults = PoolSettings::default();
        let max_connections = match get("DB_MAX_CONNECTIONS") {
            Some(v) => parse_var("DB_MAX_CONNECTIONS", &v)?,
            None => defaults.max_connections,
        };
        let acquire_timeout = match get("DB_ACQUIRE_TIMEOUT_SECS") {
            Some(v) => Duration::from_secs(parse_var("DB_ACQUIRE_TIMEOUT_SECS", &v)?),
            None => defaults.acquire_timeout,
        };

        let bind = get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.into());
        let bind_addr = bind.parse().map_err(|_| ConfigError::BindAddr(bind))?;

        let frontend_origin = get("FRONTEND_URL")
            .map(|origin| {
                HeaderValue::from_str(origin.trim_end_matches('/'))
                    .map_err(|_| ConfigError::Origin(origin))
            })
            .transpose()?;

        Ok(Self {
            database_url: get("DATABASE_URL"),
            in_memory: false,
            pool: PoolSettings {
                max_connections,
                acquire_timeout,
            },
            bind_addr,
            frontend_origin,
        })
    }
}

fn parse_var<T>(var: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|e: T::Err| ConfigError::InvalidVar {
        var,
        message: e.to_string(),
    })
}
