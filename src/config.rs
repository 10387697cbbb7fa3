use std::{fmt, net::SocketAddr, str::FromStr};

use thiserror::Error;
use tokio::sync::Semaphore;

use crate::infrastructure::bcrypt_password_hasher::DEFAULT_COST;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_TOKEN_EXPIRATION_HOURS: i64 = 24;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable {0}")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

/// Runtime settings, read from the process environment and `.env`
#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt_secret: String,
    pub bcrypt_cost: u32,
    pub token_expiration_hours: i64,
    pub max_concurrent_hashes: usize,
    pub bind_addr: SocketAddr,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| dotenvy::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |key: &'static str| lookup(key).ok_or(ConfigError::Missing(key));

        let default_parallelism = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);

        let token_expiration_hours = parse_or(
            &lookup,
            "TOKEN_EXPIRATION_HOURS",
            DEFAULT_TOKEN_EXPIRATION_HOURS,
        )?;
        ensure("TOKEN_EXPIRATION_HOURS", token_expiration_hours, |h| *h > 0)?;

        let max_concurrent_hashes =
            parse_or(&lookup, "MAX_CONCURRENT_HASHES", default_parallelism)?;
        ensure("MAX_CONCURRENT_HASHES", max_concurrent_hashes, |n| {
            (1..=Semaphore::MAX_PERMITS).contains(n)
        })?;

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            jwt_secret: required("JWT_SECRET")?,
            bcrypt_cost: parse_or(&lookup, "BCRYPT_COST", DEFAULT_COST)?,
            token_expiration_hours,
            max_concurrent_hashes,
            bind_addr: match lookup("BIND_ADDR") {
                Some(value) => parse("BIND_ADDR", value)?,
                None => parse("BIND_ADDR", DEFAULT_BIND_ADDR.to_string())?,
            },
        })
    }
}

fn parse<V: FromStr>(key: &'static str, value: String) -> Result<V, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { key, value })
}

fn ensure<V: ToString>(
    key: &'static str,
    value: V,
    accept: impl FnOnce(&V) -> bool,
) -> Result<(), ConfigError> {
    if accept(&value) {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            key,
            value: value.to_string(),
        })
    }
}

fn parse_or<V: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: V,
) -> Result<V, ConfigError> {
    match lookup(key) {
        Some(value) => parse(key, value),
        None => Ok(default),
    }
}

// secrets stay out of logs
impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("database_url", &"<redacted>")
            .field("jwt_secret", &"<redacted>")
            .field("bcrypt_cost", &self.bcrypt_cost)
            .field("token_expiration_hours", &self.token_expiration_hours)
            .field("max_concurrent_hashes", &self.max_concurrent_hashes)
            .field("bind_addr", &self.bind_addr)
            .finish()
    }
}
