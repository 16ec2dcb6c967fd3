use std::str::FromStr;

use anyhow::{ensure, Context, Result};

/// Default per-request cap on statements; pairwise scoring is O(n²).
const DEFAULT_MAX_STATEMENTS: usize = 500;

/// Application configuration loaded from environment variables.
/// Every variable has a default; only malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub max_statements: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let max_statements = parse_env("DEDUP_MAX_STATEMENTS", DEFAULT_MAX_STATEMENTS)?;
        ensure!(max_statements > 0, "DEDUP_MAX_STATEMENTS must be at least 1");

        Ok(Config {
            port: parse_env("PORT", 8080u16)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            max_statements,
        })
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
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
    fn test_parse_env_default_when_unset() {
        let value: usize = parse_env("ACHIEVEMENTS_TEST_UNSET_VAR", 42).unwrap();
        assert_eq!(value, 42);
    }

    #[test]
    fn test_parse_env_reads_value() {
        std::env::set_var("ACHIEVEMENTS_TEST_PORT_VAR", " 9090 ");
        let value: u16 = parse_env("ACHIEVEMENTS_TEST_PORT_VAR", 8080).unwrap();
        assert_eq!(value, 9090);
    }

    #[test]
    fn test_parse_env_rejects_garbage() {
        std::env::set_var("ACHIEVEMENTS_TEST_BAD_VAR", "lots");
        let err = parse_env::<usize>("ACHIEVEMENTS_TEST_BAD_VAR", 1).unwrap_err();
        assert!(err.to_string().contains("ACHIEVEMENTS_TEST_BAD_VAR"), "{err}");
    }
}
