//! Configuration for the MyGram API service.

use std::str::FromStr;
use std::time::Duration;

use mygram_auth_core::{Argon2Params, AuthConfig};

/// Longest accepted token lifetime (ten years)
const MAX_TOKEN_TTL_HOURS: u64 = 24 * 365 * 10;

/// API configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub http_port: u16,

    /// Database URL; without one the in-memory backend is used
    pub database_url: Option<String>,

    /// Auth core configuration
    pub auth: AuthConfig,

    /// Request timeout
    pub request_timeout: Duration,

    /// Metrics enabled
    pub metrics_enabled: bool,
}

impl Config {
    /// Defaults around an existing auth config
    pub fn new(auth: AuthConfig) -> Self {
        Self {
            http_port: 8080,
            database_url: None,
            auth,
            request_timeout: Duration::from_secs(30),
            metrics_enabled: true,
        }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration from any variable source
    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        // Database (optional)
        let database_url = var("DATABASE_URL").filter(|url| !url.is_empty());

        let http_port = parse_or(&var, "HTTP_PORT", 8080)?;

        // Token secret (minimum 32 bytes)
        let token_secret = var("TOKEN_SECRET").ok_or(ConfigError::Missing("TOKEN_SECRET"))?;
        if token_secret.len() < 32 {
            return Err(ConfigError::Invalid(
                "TOKEN_SECRET must be at least 32 characters",
            ));
        }

        let token_ttl_hours: u64 = parse_or(&var, "TOKEN_TTL_HOURS", 24)?;
        let token_ttl_secs = Some(token_ttl_hours)
            .filter(|hours| (1..=MAX_TOKEN_TTL_HOURS).contains(hours))
            .and_then(|hours| hours.checked_mul(3600))
            .ok_or(ConfigError::Invalid("TOKEN_TTL_HOURS"))?;
        let request_timeout_secs: u64 = parse_or(&var, "REQUEST_TIMEOUT_SECS", 30)?;
        let metrics_enabled = parse_or(&var, "METRICS_ENABLED", true)?;

        let mut auth = AuthConfig::try_new(&token_secret)
            .map_err(|e| ConfigError::AuthConfig(e.to_string()))?
            .with_token_ttl(Duration::from_secs(token_ttl_secs));

        if let Some(workers) = parse_opt::<usize>(&var, "HASH_WORKERS")? {
            auth = auth.with_hash_workers(workers);
        }

        // Argon2 work factor, each falling back to the library default
        let defaults = Argon2Params::default();
        auth = auth.with_argon2_params(Argon2Params {
            m_cost: parse_or(&var, "ARGON2_M_COST", defaults.m_cost)?,
            t_cost: parse_or(&var, "ARGON2_T_COST", defaults.t_cost)?,
            p_cost: parse_or(&var, "ARGON2_P_COST", defaults.p_cost)?,
        });

        Ok(Self {
            http_port,
            database_url,
            auth,
            request_timeout: Duration::from_secs(request_timeout_secs),
            metrics_enabled,
        })
    }
}

fn parse_opt<T: FromStr>(
    var: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<Option<T>, ConfigError> {
    var(name)
        .map(|value| value.trim().parse().map_err(|_| ConfigError::Invalid(name)))
        .transpose()
}

fn parse_or<T: FromStr>(
    var: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    Ok(parse_opt(var, name)?.unwrap_or(default))
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),

    #[error("Auth config error: {0}")]
    AuthConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[("TOKEN_SECRET", SECRET)]).unwrap();
        assert_eq!(config.http_port, 8080);
        assert!(config.database_url.is_none());
        assert_eq!(config.auth.token_ttl, Duration::from_secs(24 * 3600));
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert!(config.metrics_enabled);
        assert_eq!(config.auth.argon2, Argon2Params::default());
    }

    #[test]
    fn test_missing_secret() {
        assert!(matches!(
            load(&[]),
            Err(ConfigError::Missing("TOKEN_SECRET"))
        ));
    }

    #[test]
    fn test_short_secret() {
        assert!(matches!(
            load(&[("TOKEN_SECRET", "short")]),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("TOKEN_SECRET", SECRET),
            ("DATABASE_URL", "postgres://localhost/mygram"),
            ("HTTP_PORT", "9000"),
            ("TOKEN_TTL_HOURS", "1"),
            ("HASH_WORKERS", "3"),
            ("ARGON2_M_COST", "4096"),
            ("METRICS_ENABLED", "false"),
        ])
        .unwrap();

        assert_eq!(config.http_port, 9000);
        assert_eq!(
            config.database_url.as_deref(),
            Some("postgres://localhost/mygram")
        );
        assert_eq!(config.auth.token_ttl, Duration::from_secs(3600));
        assert_eq!(config.auth.hash_workers, 3);
        assert_eq!(config.auth.argon2.m_cost, 4096);
        assert!(!config.metrics_enabled);
    }

    #[test]
    fn test_token_ttl_bounds() {
        for hours in ["0", "87601", "18446744073709551615"] {
            assert!(
                matches!(
                    load(&[("TOKEN_SECRET", SECRET), ("TOKEN_TTL_HOURS", hours)]),
                    Err(ConfigError::Invalid("TOKEN_TTL_HOURS"))
                ),
                "{hours}"
            );
        }
        let config = load(&[("TOKEN_SECRET", SECRET), ("TOKEN_TTL_HOURS", "87600")]).unwrap();
        assert_eq!(config.auth.token_ttl, Duration::from_secs(87_600 * 3600));
    }

    #[test]
    fn test_invalid_number() {
        assert!(matches!(
            load(&[("TOKEN_SECRET", SECRET), ("HTTP_PORT", "eighty")]),
            Err(ConfigError::Invalid("HTTP_PORT"))
        ));
    }
}
