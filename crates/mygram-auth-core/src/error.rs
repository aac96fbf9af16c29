//! Auth errors

use mygram_types::ResourceKind;
use thiserror::Error;

/// Authentication and authorization errors
#[derive(Error, Debug)]
pub enum AuthError {
    /// Password does not meet the length policy
    #[error("password must be at least {min} characters")]
    WeakCredential { min: usize },

    /// Wrong email or password
    #[error("invalid credentials")]
    InvalidCredential,

    /// Token signature does not match its payload
    #[error("invalid token signature")]
    InvalidSignature,

    /// Token has expired
    #[error("token expired")]
    Expired,

    /// Token is structurally broken or its payload cannot be parsed
    #[error("malformed token")]
    Malformed,

    /// Target resource does not exist
    #[error("{0} not found")]
    NotFound(ResourceKind),

    /// Requester does not own the target resource
    #[error("not allowed to modify this {0}")]
    Forbidden(ResourceKind),

    /// Missing or unverifiable token at the pipeline boundary
    #[error("unauthorized")]
    Unauthorized,

    /// Unique field already taken
    #[error("{0} already registered")]
    Conflict(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidCredential
            | Self::InvalidSignature
            | Self::Expired
            | Self::Malformed
            | Self::Unauthorized => 401,
            Self::Forbidden(_) => 403,
            Self::NotFound(_) => 404,
            Self::Conflict(_) => 409,
            Self::WeakCredential { .. } => 422,
            Self::Configuration(_) | Self::Internal(_) => 500,
        }
    }

    /// Get error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::WeakCredential { .. } => "WEAK_CREDENTIAL",
            Self::InvalidCredential => "INVALID_CREDENTIALS",
            Self::InvalidSignature => "INVALID_SIGNATURE",
            Self::Expired => "TOKEN_EXPIRED",
            Self::Malformed => "MALFORMED_TOKEN",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Conflict(_) => "CONFLICT",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Short label for the `reason` metric dimension
    pub fn reason(&self) -> &'static str {
        match self {
            Self::InvalidSignature => "invalid_signature",
            Self::Expired => "expired",
            Self::Malformed => "malformed",
            Self::Unauthorized => "missing",
            _ => "other",
        }
    }
}

impl From<mygram_db::DbError> for AuthError {
    fn from(err: mygram_db::DbError) -> Self {
        match err {
            mygram_db::DbError::Conflict(field) => Self::Conflict(field),
            other => {
                tracing::error!("Database error: {}", other);
                Self::Internal("storage failure".to_string())
            }
        }
    }
}

impl From<tokio::task::JoinError> for AuthError {
    fn from(err: tokio::task::JoinError) -> Self {
        tracing::error!("Hashing task failed: {}", err);
        Self::Internal("hashing task failed".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_failures_are_401() {
        for err in [
            AuthError::InvalidSignature,
            AuthError::Expired,
            AuthError::Malformed,
            AuthError::Unauthorized,
            AuthError::InvalidCredential,
        ] {
            assert_eq!(err.status_code(), 401, "{err}");
        }
    }

    #[test]
    fn test_ownership_statuses() {
        assert_eq!(AuthError::NotFound(ResourceKind::Photo).status_code(), 404);
        assert_eq!(AuthError::Forbidden(ResourceKind::Comment).status_code(), 403);
        assert_eq!(
            AuthError::Forbidden(ResourceKind::SocialMedia).to_string(),
            "not allowed to modify this social_media"
        );
    }

    #[test]
    fn test_db_conflict_keeps_field() {
        let err: AuthError = mygram_db::DbError::Conflict("email".to_string()).into();
        assert!(matches!(err, AuthError::Conflict(ref f) if f == "email"));
        assert_eq!(err.status_code(), 409);
    }

    #[test]
    fn test_db_failure_is_internal() {
        let err: AuthError = mygram_db::DbError::NotFound.into();
        assert!(matches!(err, AuthError::Internal(_)));
        assert_eq!(err.error_code(), "INTERNAL_ERROR");
    }
}
