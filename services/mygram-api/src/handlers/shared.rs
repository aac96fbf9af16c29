//! Shared handler utilities
//!
//! Request-body validation used across handlers. The auth core assumes its
//! inputs were checked here.

use std::sync::LazyLock;

use mygram_auth_core::AuthError;
use mygram_db::DbError;
use regex::Regex;
use serde::Serialize;

use crate::error::{ApiError, ApiResult};
use crate::extractors::AuthUser;
use crate::state::AppState;

// ============================================================================
// Input Validation
// ============================================================================

/// Maximum length for user-provided strings
const MAX_STRING_LEN: usize = 256;

/// Maximum length for URLs
const MAX_URL_LEN: usize = 2048;

/// Minimum age accepted at registration
pub const MIN_AGE: i32 = 8;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("email pattern is valid")
});

/// Require a non-blank value of bounded length
pub fn require_text(value: &str, field_name: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::BadRequest(format!("{field_name} is required")));
    }
    validate_string_length(value, field_name)
}

/// Validate a user-provided string is within safe bounds.
pub fn validate_string_length(value: &str, field_name: &str) -> Result<(), ApiError> {
    if value.chars().count() > MAX_STRING_LEN {
        return Err(ApiError::BadRequest(format!(
            "{field_name} too long (max {MAX_STRING_LEN} chars)"
        )));
    }
    Ok(())
}

/// Validate an email address format
pub fn validate_email(email: &str) -> Result<(), ApiError> {
    if email.len() > MAX_STRING_LEN || !EMAIL_RE.is_match(email) {
        return Err(ApiError::BadRequest("invalid email format".into()));
    }
    Ok(())
}

/// Require a non-blank URL of bounded length
pub fn validate_url(url: &str, field_name: &str) -> Result<(), ApiError> {
    if url.trim().is_empty() {
        return Err(ApiError::BadRequest(format!("{field_name} is required")));
    }
    if url.len() > MAX_URL_LEN {
        return Err(ApiError::BadRequest(format!(
            "{field_name} too long (max {MAX_URL_LEN} chars)"
        )));
    }
    Ok(())
}

/// Validate registration age
pub fn validate_age(age: i32) -> Result<(), ApiError> {
    if age < MIN_AGE {
        return Err(ApiError::BadRequest(format!(
            "age must be at least {MIN_AGE}"
        )));
    }
    Ok(())
}

// ============================================================================
// Account Checks
// ============================================================================

/// Require that the caller's account still exists.
///
/// Tokens stay valid after their account is deleted, so creates check the
/// owner before writing a row that would point at nobody.
pub async fn require_account(state: &AppState, user: AuthUser) -> ApiResult<()> {
    if state.repos.users.find_by_id(user.user_id.0).await?.is_none() {
        tracing::debug!(user_id = %user.user_id, "Token for a deleted account");
        return Err(AuthError::Unauthorized.into());
    }
    Ok(())
}

/// Map a create whose referenced row vanished to `missing`, other errors as usual
pub fn or_missing(missing: AuthError) -> impl FnOnce(DbError) -> ApiError {
    move |err| match err {
        DbError::NotFound => missing.into(),
        other => other.into(),
    }
}

// ============================================================================
// Responses
// ============================================================================

/// Confirmation body for deletions
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("user@example.com").is_ok());
        assert!(validate_email("first.last+tag@sub.example.co").is_ok());

        assert!(validate_email("").is_err());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("user@").is_err());
        assert!(validate_email("user@-example.com").is_err());
        assert!(validate_email("us er@example.com").is_err());
    }

    #[test]
    fn test_require_text() {
        assert!(require_text("sunset", "title").is_ok());
        assert!(require_text("   ", "title").is_err());

        let long = "a".repeat(MAX_STRING_LEN + 1);
        assert!(require_text(&long, "title").is_err());
    }

    #[test]
    fn test_validate_url() {
        assert!(validate_url("https://img.example.com/a.jpg", "photo_url").is_ok());
        assert!(validate_url("", "photo_url").is_err());
        assert!(validate_url(&"x".repeat(MAX_URL_LEN + 1), "photo_url").is_err());
    }

    #[test]
    fn test_or_missing_maps_only_not_found() {
        let err = or_missing(AuthError::Unauthorized)(DbError::NotFound);
        assert!(matches!(err, ApiError::Auth(AuthError::Unauthorized)));

        let err = or_missing(AuthError::Unauthorized)(DbError::Conflict("email".into()));
        assert!(matches!(err, ApiError::Auth(AuthError::Conflict(_))));
    }

    #[test]
    fn test_validate_age() {
        assert!(validate_age(MIN_AGE).is_ok());
        assert!(validate_age(MIN_AGE - 1).is_err());
    }
}
