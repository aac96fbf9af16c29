//! Credential store
//!
//! Salted Argon2id password hashes kept in a [`CredentialRepository`]. Hashing
//! and verification run on the blocking pool, at most `hash_workers` at a time.
//!
//! A check for an account without a stored hash still runs one Argon2
//! verification against a decoy hash, so its timing matches a wrong password.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use argon2::{Algorithm, Argon2, Params, PasswordHasher, PasswordVerifier, Version};
use mygram_db::CredentialRepository;
use mygram_types::UserId;
use password_hash::rand_core::OsRng;
use password_hash::{PasswordHash, SaltString};
use tokio::sync::{OnceCell, Semaphore};

use crate::config::{Argon2Params, AuthConfig};
use crate::AuthError;

/// Hashes, stores and checks user passwords
#[derive(Clone)]
pub struct CredentialStore {
    repo: Arc<dyn CredentialRepository>,
    hasher: Argon2<'static>,
    min_password_len: usize,
    permits: Arc<Semaphore>,
    decoy: Arc<OnceCell<String>>,
    verifications: Arc<AtomicU64>,
}

const DECOY_PASSWORD: &str = "mygram-decoy-password";

impl CredentialStore {
    /// Create a credential store with the work factor and policy from `config`
    pub fn new(repo: Arc<dyn CredentialRepository>, config: &AuthConfig) -> Result<Self, AuthError> {
        Ok(Self {
            repo,
            hasher: build_hasher(config.argon2)?,
            min_password_len: config.min_password_len,
            permits: Arc::new(Semaphore::new(config.hash_workers.max(1))),
            decoy: Arc::new(OnceCell::new()),
            verifications: Arc::new(AtomicU64::new(0)),
        })
    }

    /// Check a candidate password against the length policy
    pub fn check_policy(&self, password: &str) -> Result<(), AuthError> {
        if password.chars().count() < self.min_password_len {
            return Err(AuthError::WeakCredential {
                min: self.min_password_len,
            });
        }
        Ok(())
    }

    /// Hash and store the first password for a user
    pub async fn create(&self, user_id: UserId, password: &str) -> Result<(), AuthError> {
        self.check_policy(password)?;
        let hash = self.hash(password).await?;
        self.repo.insert(user_id.0, &hash).await?;
        tracing::debug!(%user_id, "Credential created");
        Ok(())
    }

    /// Re-hash and overwrite the password for a user
    pub async fn update(&self, user_id: UserId, password: &str) -> Result<(), AuthError> {
        self.check_policy(password)?;
        let hash = self.hash(password).await?;
        if !self.repo.update(user_id.0, &hash).await? {
            return Err(AuthError::Internal("credential missing for user".to_string()));
        }
        tracing::debug!(%user_id, "Credential updated");
        Ok(())
    }

    /// Check a password. Returns false on mismatch or when the user has no credential.
    pub async fn verify(&self, user_id: UserId, password: &str) -> Result<bool, AuthError> {
        match self.repo.find_hash(user_id.0).await? {
            Some(stored) => self.check_hash(stored, password).await,
            None => {
                self.verify_decoy(password).await?;
                Ok(false)
            }
        }
    }

    /// Spend one verification's worth of work for a login that cannot succeed
    pub async fn verify_decoy(&self, password: &str) -> Result<(), AuthError> {
        let decoy = self
            .decoy
            .get_or_try_init(|| self.hash(DECOY_PASSWORD))
            .await?
            .clone();
        self.check_hash(decoy, password).await?;
        Ok(())
    }

    /// Number of password verifications run on the hashing pool
    pub fn verifications(&self) -> u64 {
        self.verifications.load(Ordering::Relaxed)
    }

    async fn check_hash(&self, stored: String, password: &str) -> Result<bool, AuthError> {
        let _permit = self.acquire().await?;
        let hasher = self.hasher.clone();
        let password = password.to_owned();
        self.verifications.fetch_add(1, Ordering::Relaxed);
        let matched = tokio::task::spawn_blocking(move || match PasswordHash::new(&stored) {
            Ok(parsed) => hasher.verify_password(password.as_bytes(), &parsed).is_ok(),
            Err(e) => {
                tracing::warn!("Stored password hash is unreadable: {}", e);
                false
            }
        })
        .await?;

        Ok(matched)
    }

    async fn hash(&self, password: &str) -> Result<String, AuthError> {
        let _permit = self.acquire().await?;
        let hasher = self.hasher.clone();
        let password = password.to_owned();
        tokio::task::spawn_blocking(move || {
            let salt = SaltString::generate(&mut OsRng);
            hasher
                .hash_password(password.as_bytes(), &salt)
                .map(|phc| phc.to_string())
                .map_err(|e| AuthError::Internal(format!("password hashing failed: {e}")))
        })
        .await?
    }

    async fn acquire(&self) -> Result<tokio::sync::SemaphorePermit<'_>, AuthError> {
        self.permits
            .acquire()
            .await
            .map_err(|_| AuthError::Internal("hashing pool closed".to_string()))
    }
}

fn build_hasher(params: Argon2Params) -> Result<Argon2<'static>, AuthError> {
    let params = Params::new(params.m_cost, params.t_cost, params.p_cost, None)
        .map_err(|e| AuthError::Configuration(format!("invalid argon2 parameters: {e}")))?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}
