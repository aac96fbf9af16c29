//! Account handlers (register, login, update, delete)

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use uuid::Uuid;

use mygram_auth_core::{AccountUpdate, NewAccount};
use mygram_db::UserRow;

use super::shared::{
    require_text, validate_age, validate_email, validate_string_length, MessageResponse,
};
use crate::error::ApiResult;
use crate::extractors::{ApiJson, AuthUser};
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub age: i32,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub age: i32,
    pub updated_at: DateTime<Utc>,
}

impl From<UserRow> for UserResponse {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            username: row.username,
            email: row.email,
            age: row.age,
            updated_at: row.updated_at,
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /register
#[instrument(skip(state, req), fields(username = %req.username))]
pub async fn register(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<UserResponse>)> {
    require_text(&req.username, "username")?;
    validate_email(&req.email)?;
    validate_age(req.age)?;
    validate_string_length(&req.password, "password")?;

    let user = state
        .accounts
        .register(NewAccount {
            username: req.username,
            email: req.email,
            age: req.age,
            password: req.password,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// POST /login
#[instrument(skip(state, req))]
pub async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let issued = state.accounts.login(&req.email, &req.password).await?;

    Ok(Json(LoginResponse {
        token: issued.token,
        expires_at: issued.expires_at,
    }))
}

/// PUT /api/users
#[instrument(skip(state, user, req), fields(user_id = %user.user_id))]
pub async fn update_user(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(req): ApiJson<UpdateUserRequest>,
) -> ApiResult<Json<UserResponse>> {
    // blank fields mean "leave unchanged"
    let email = req.email.filter(|e| !e.is_empty());
    let password = req.password.filter(|p| !p.is_empty());

    if let Some(email) = &email {
        validate_email(email)?;
    }
    if let Some(password) = &password {
        validate_string_length(password, "password")?;
    }

    let updated = state
        .accounts
        .update_account(user.user_id, AccountUpdate { email, password })
        .await?;

    Ok(Json(updated.into()))
}

/// DELETE /api/users
#[instrument(skip(state, user), fields(user_id = %user.user_id))]
pub async fn delete_user(
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<Json<MessageResponse>> {
    state.accounts.delete_account(user.user_id).await?;

    Ok(Json(MessageResponse {
        message: "Your account has been successfully deleted",
    }))
}
