//! MyGram Auth Core - Authentication and authorization logic
//!
//! Credential hashing, signed session tokens, per-resource ownership checks
//! and the pipeline that composes them in front of protected operations.

pub mod config;
pub mod credential;
pub mod crypto;
pub mod error;
pub mod ownership;
pub mod pipeline;
pub mod service;
pub mod token;

pub use config::{Argon2Params, AuthConfig};
pub use credential::CredentialStore;
pub use error::*;
pub use ownership::{authorize, Decision, DenyReason};
pub use pipeline::AuthPipeline;
pub use service::{AccountService, AccountUpdate, NewAccount};
pub use token::{IssuedToken, TokenClaims, TokenService};
