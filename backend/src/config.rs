use std::env;

use chrono::Duration;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{var} has an invalid value: {value}")]
    Invalid { var: &'static str, value: String },
}

/// Signing secret and lifetimes for issued tokens
#[derive(Debug, Clone)]
pub struct TokenSettings {
    pub secret: String,
    pub access_ttl: Duration,
    pub refresh_ttl: Duration,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub tokens: TokenSettings,
    pub secure_cookies: bool,
    pub static_files_path: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let secret = env::var("JWT_SECRET")
            .ok()
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::Missing("JWT_SECRET"))?;

        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parse_var("PORT", 3000)?,
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:authflow.db?mode=rwc".to_string()),
            tokens: TokenSettings {
                secret,
                access_ttl: ttl_var("ACCESS_TOKEN_TTL_SECS", 20)?,
                refresh_ttl: ttl_var("REFRESH_TOKEN_TTL_SECS", 7 * 24 * 60 * 60)?,
            },
            secure_cookies: parse_var("COOKIE_SECURE", true)?,
            static_files_path: env::var("STATIC_FILES_PATH")
                .unwrap_or_else(|_| "./public".to_string()),
        })
    }
}

fn parse_var<T: std::str::FromStr>(var: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(var) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { var, value }),
        Err(_) => Ok(default),
    }
}

fn ttl_var(var: &'static str, default_secs: i64) -> Result<Duration, ConfigError> {
    let secs: i64 = parse_var(var, default_secs)?;
    if secs <= 0 {
        return Err(ConfigError::Invalid { var, value: secs.to_string() });
    }
    Ok(Duration::seconds(secs))
}
