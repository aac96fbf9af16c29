//! Configuration types for the auth core

use std::time::Duration;

use crate::crypto::{HmacKey, HmacKeyError};

/// Argon2id work factor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Argon2Params {
    /// Memory size in KiB
    pub m_cost: u32,
    /// Number of iterations
    pub t_cost: u32,
    /// Degree of parallelism
    pub p_cost: u32,
}

impl Default for Argon2Params {
    fn default() -> Self {
        Self {
            m_cost: argon2::Params::DEFAULT_M_COST,
            t_cost: argon2::Params::DEFAULT_T_COST,
            p_cost: argon2::Params::DEFAULT_P_COST,
        }
    }
}

/// Auth core configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Key used to sign session tokens
    pub token_key: HmacKey,
    /// Session token lifetime
    pub token_ttl: Duration,
    /// Minimum password length in characters
    pub min_password_len: usize,
    /// Maximum number of concurrent hash computations
    pub hash_workers: usize,
    /// Password hashing work factor
    pub argon2: Argon2Params,
}

impl AuthConfig {
    /// Default token lifetime (24 hours)
    pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(24 * 60 * 60);

    /// Default minimum password length
    pub const DEFAULT_MIN_PASSWORD_LEN: usize = 6;

    /// Create a new auth config from the token signing secret
    ///
    /// # Errors
    /// Returns error if the secret is shorter than 32 bytes.
    pub fn try_new(token_secret: impl AsRef<[u8]>) -> Result<Self, HmacKeyError> {
        Ok(Self {
            token_key: HmacKey::new(token_secret)?,
            token_ttl: Self::DEFAULT_TOKEN_TTL,
            min_password_len: Self::DEFAULT_MIN_PASSWORD_LEN,
            hash_workers: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
            argon2: Argon2Params::default(),
        })
    }

    /// Set token lifetime
    pub fn with_token_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = ttl;
        self
    }

    /// Set minimum password length
    pub fn with_min_password_len(mut self, len: usize) -> Self {
        self.min_password_len = len;
        self
    }

    /// Set hashing concurrency (at least one)
    pub fn with_hash_workers(mut self, workers: usize) -> Self {
        self.hash_workers = workers.max(1);
        self
    }

    /// Set Argon2 work factor
    pub fn with_argon2_params(mut self, params: Argon2Params) -> Self {
        self.argon2 = params;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AuthConfig::try_new("s".repeat(32)).unwrap();
        assert_eq!(config.token_ttl, Duration::from_secs(86_400));
        assert_eq!(config.min_password_len, 6);
        assert!(config.hash_workers >= 1);
        assert_eq!(config.argon2, Argon2Params::default());
    }

    #[test]
    fn test_short_secret_rejected() {
        assert!(AuthConfig::try_new("too-short").is_err());
    }

    #[test]
    fn test_builders() {
        let params = Argon2Params {
            m_cost: 1024,
            t_cost: 1,
            p_cost: 1,
        };
        let config = AuthConfig::try_new("s".repeat(32))
            .unwrap()
            .with_token_ttl(Duration::from_secs(60))
            .with_min_password_len(8)
            .with_hash_workers(0)
            .with_argon2_params(params);

        assert_eq!(config.token_ttl, Duration::from_secs(60));
        assert_eq!(config.min_password_len, 8);
        assert_eq!(config.hash_workers, 1);
        assert_eq!(config.argon2, params);
    }
}
