use std::time::Duration;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Number of mock resources generated at startup and on every refresh.
    pub seed_resource_count: usize,
    /// `None` disables the periodic refresh.
    pub refresh_interval: Option<Duration>,
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let refresh_secs: u64 = parse_env("REFRESH_INTERVAL_SECS", 7 * 24 * 60 * 60)?;

        Ok(Config {
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            seed_resource_count: parse_env("SEED_RESOURCE_COUNT", 100)?,
            refresh_interval: (refresh_secs > 0).then(|| Duration::from_secs(refresh_secs)),
            request_timeout: Duration::from_secs(parse_env("REQUEST_TIMEOUT_SECS", 10)?),
        })
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_variable_uses_default() {
        let value: u16 = parse_env("RMS_TEST_SURELY_UNSET_VAR", 8080).unwrap();
        assert_eq!(value, 8080);
    }

    #[test]
    fn test_malformed_variable_is_an_error() {
        std::env::set_var("RMS_TEST_BAD_PORT", "eighty");
        let err = parse_env::<u16>("RMS_TEST_BAD_PORT", 8080).unwrap_err();
        assert!(err.to_string().contains("RMS_TEST_BAD_PORT"));
        std::env::remove_var("RMS_TEST_BAD_PORT");
    }
}
