//! Comment handlers

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use uuid::Uuid;

use mygram_auth_core::AuthError;
use mygram_db::{CommentRow, CreateComment};
use mygram_types::{CommentId, ResourceKind};

use super::shared::{or_missing, require_account, require_text, MessageResponse};
use crate::error::ApiResult;
use crate::extractors::{ApiJson, AuthUser, Owned};
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    pub message: String,
    pub photo_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCommentRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct CommentResponse {
    pub id: Uuid,
    pub message: String,
    pub photo_id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CommentRow> for CommentResponse {
    fn from(row: CommentRow) -> Self {
        Self {
            id: row.id,
            message: row.message,
            photo_id: row.photo_id,
            user_id: row.user_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/comments
#[instrument(skip(state, user), fields(user_id = %user.user_id))]
pub async fn list_comments(
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<Json<Vec<CommentResponse>>> {
    let comments = state.repos.comments.list().await?;
    Ok(Json(comments.into_iter().map(Into::into).collect()))
}

/// POST /api/comments
#[instrument(skip(state, user, req), fields(user_id = %user.user_id, photo_id = %req.photo_id))]
pub async fn create_comment(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(req): ApiJson<CreateCommentRequest>,
) -> ApiResult<(StatusCode, Json<CommentResponse>)> {
    require_text(&req.message, "message")?;
    require_account(&state, user).await?;

    if state.repos.photos.find_by_id(req.photo_id).await?.is_none() {
        return Err(AuthError::NotFound(ResourceKind::Photo).into());
    }

    let comment = state
        .repos
        .comments
        .create(CreateComment {
            id: CommentId::new().0,
            user_id: user.user_id.0,
            photo_id: req.photo_id,
            message: req.message,
        })
        .await
        .map_err(or_missing(AuthError::NotFound(ResourceKind::Photo)))?;

    Ok((StatusCode::CREATED, Json(comment.into())))
}

/// PUT /api/comments/{commentId}
#[instrument(skip(state, owned, req), fields(user_id = %owned.user_id, comment_id = %owned.id))]
pub async fn update_comment(
    State(state): State<AppState>,
    owned: Owned<CommentId>,
    ApiJson(req): ApiJson<UpdateCommentRequest>,
) -> ApiResult<Json<CommentResponse>> {
    require_text(&req.message, "message")?;

    let comment = state
        .repos
        .comments
        .update(owned.id.0, &req.message)
        .await?
        .ok_or(AuthError::NotFound(ResourceKind::Comment))?;

    Ok(Json(comment.into()))
}

/// DELETE /api/comments/{commentId}
#[instrument(skip(state, owned), fields(user_id = %owned.user_id, comment_id = %owned.id))]
pub async fn delete_comment(
    State(state): State<AppState>,
    owned: Owned<CommentId>,
) -> ApiResult<Json<MessageResponse>> {
    if !state.repos.comments.delete(owned.id.0).await? {
        return Err(AuthError::NotFound(ResourceKind::Comment).into());
    }

    Ok(Json(MessageResponse {
        message: "Your comment has been successfully deleted",
    }))
}
