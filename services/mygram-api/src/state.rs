//! Application state for the MyGram API service.

use std::sync::Arc;

use mygram_auth_core::{AccountService, AuthError};
use mygram_db::{DbPool, Repositories};

use crate::config::Config;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Registration, login and the auth pipeline
    pub accounts: Arc<AccountService>,
    /// Database repositories
    pub repos: Repositories,
    /// Database pool for readiness checks; `None` on the in-memory backend
    pub pool: Option<DbPool>,
    /// Configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Create new application state
    pub fn new(repos: Repositories, pool: Option<DbPool>, config: Config) -> Result<Self, AuthError> {
        let accounts = AccountService::new(&repos, &config.auth)?;
        Ok(Self {
            accounts: Arc::new(accounts),
            repos,
            pool,
            config: Arc::new(config),
        })
    }

    /// Get request timeout from config
    pub fn request_timeout(&self) -> std::time::Duration {
        self.config.request_timeout
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("postgres", &self.pool.is_some())
            .finish_non_exhaustive()
    }
}
