//! Account service - ties together users, credentials and token issuance

use std::sync::Arc;

use mygram_db::{CreateUser, Repositories, UserRepository, UserRow};
use mygram_types::UserId;

use crate::{
    config::AuthConfig,
    credential::CredentialStore,
    pipeline::AuthPipeline,
    token::{IssuedToken, TokenService},
    AuthError,
};

/// Registration input
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub email: String,
    pub age: i32,
    pub password: String,
}

/// Changes to the caller's own account
#[derive(Debug, Clone, Default)]
pub struct AccountUpdate {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Account service
///
/// Provides unified interface for:
/// - Registration and login
/// - Updating and deleting the caller's own account
/// - The auth pipeline used in front of protected operations
#[derive(Clone)]
pub struct AccountService {
    users: Arc<dyn UserRepository>,
    credentials: CredentialStore,
    pipeline: AuthPipeline,
}

impl AccountService {
    /// Create a new account service
    pub fn new(repos: &Repositories, config: &AuthConfig) -> Result<Self, AuthError> {
        let tokens = TokenService::new(config.token_key.clone(), config.token_ttl);
        Ok(Self {
            users: Arc::clone(&repos.users),
            credentials: CredentialStore::new(Arc::clone(&repos.credentials), config)?,
            pipeline: AuthPipeline::new(tokens),
        })
    }

    /// The auth pipeline sharing this service's token key
    pub fn pipeline(&self) -> &AuthPipeline {
        &self.pipeline
    }

    /// The credential store
    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    /// Register a new user with a password
    pub async fn register(&self, account: NewAccount) -> Result<UserRow, AuthError> {
        self.credentials.check_policy(&account.password)?;

        if self.users.find_by_email(&account.email).await?.is_some() {
            return Err(AuthError::Conflict("email".to_string()));
        }
        if self.users.find_by_username(&account.username).await?.is_some() {
            return Err(AuthError::Conflict("username".to_string()));
        }

        let user = self
            .users
            .create(CreateUser {
                id: UserId::new().0,
                username: account.username,
                email: account.email,
                age: account.age,
            })
            .await?;

        if let Err(err) = self.credentials.create(user.user_id(), &account.password).await {
            tracing::warn!(user_id = %user.id, "Credential write failed, removing user");
            if let Err(cleanup) = self.users.delete(user.id).await {
                tracing::error!(user_id = %user.id, "Failed to remove user: {}", cleanup);
            }
            return Err(err);
        }

        tracing::info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    /// Exchange email and password for a session token.
    ///
    /// Unknown email and wrong password are indistinguishable to the caller.
    pub async fn login(&self, email: &str, password: &str) -> Result<IssuedToken, AuthError> {
        let result = self.check_login(email, password).await;
        let label = match &result {
            Ok(_) => "success",
            Err(AuthError::InvalidCredential) => "invalid_credential",
            Err(_) => "error",
        };
        metrics::counter!("mygram_logins_total", "result" => label).increment(1);
        result
    }

    async fn check_login(&self, email: &str, password: &str) -> Result<IssuedToken, AuthError> {
        let Some(user) = self.users.find_by_email(email).await? else {
            tracing::debug!("Login for unknown email");
            self.credentials.verify_decoy(password).await?;
            return Err(AuthError::InvalidCredential);
        };

        if !self.credentials.verify(user.user_id(), password).await? {
            tracing::debug!(user_id = %user.id, "Login with wrong password");
            return Err(AuthError::InvalidCredential);
        }

        self.pipeline.tokens().issue(user.user_id())
    }

    /// Update the caller's email and/or password
    pub async fn update_account(
        &self,
        user_id: UserId,
        update: AccountUpdate,
    ) -> Result<UserRow, AuthError> {
        if let Some(password) = &update.password {
            self.credentials.check_policy(password)?;
        }

        let mut user = self
            .users
            .find_by_id(user_id.0)
            .await?
            .ok_or(AuthError::Unauthorized)?;

        let previous_email = user.email.clone();
        if let Some(email) = &update.email {
            if *email != user.email {
                user = self
                    .users
                    .update_email(user_id.0, email)
                    .await?
                    .ok_or(AuthError::Unauthorized)?;
            }
        }

        if let Some(password) = &update.password {
            if let Err(err) = self.credentials.update(user_id, password).await {
                if user.email != previous_email {
                    tracing::warn!(%user_id, "Credential update failed, restoring email");
                    if let Err(restore) = self.users.update_email(user_id.0, &previous_email).await {
                        tracing::error!(%user_id, "Failed to restore email: {}", restore);
                    }
                }
                return Err(err);
            }
        }

        Ok(user)
    }

    /// Delete the caller's account and everything it owns
    pub async fn delete_account(&self, user_id: UserId) -> Result<(), AuthError> {
        if !self.users.delete(user_id.0).await? {
            return Err(AuthError::Unauthorized);
        }
        tracing::info!(%user_id, "User deleted");
        Ok(())
    }
}
