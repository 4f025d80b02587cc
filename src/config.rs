use derive_more::Display;
use std::time::Duration;

#[derive(Debug, Display, PartialEq, Eq)]
pub enum ConfigError {
    #[display(fmt = "env {} is not set", _0)]
    Missing(&'static str),
    #[display(fmt = "env {} must be a positive integer", _0)]
    Invalid(&'static str),
}

impl std::error::Error for ConfigError {}

#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub pool_size: u32,
    pub store_timeout: Duration,
    pub rate_limit_per_second: u64,
    pub rate_limit_burst: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        Ok(Config {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: positive(&lookup, "PORT", 4000)?,
            database_url,
            pool_size: positive(&lookup, "POOL_SIZE", 10)?,
            store_timeout: Duration::from_millis(positive(&lookup, "STORE_TIMEOUT_MS", 5000)?),
            rate_limit_per_second: positive(&lookup, "RATE_LIMIT_PER_SECOND", 2)?,
            rate_limit_burst: positive(&lookup, "RATE_LIMIT_BURST", 60)?,
        })
    }
}

fn positive<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&'static str) -> Option<String>,
    T: std::str::FromStr + PartialOrd + Default,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => match raw.trim().parse::<T>() {
            Ok(value) if value > T::default() => Ok(value),
            _ => Err(ConfigError::Invalid(key)),
        },
    }
}
