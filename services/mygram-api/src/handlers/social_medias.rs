//! Social media link handlers

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use uuid::Uuid;

use mygram_auth_core::AuthError;
use mygram_db::{CreateSocialMedia, SocialMediaRow, UpdateSocialMedia};
use mygram_types::{ResourceKind, SocialMediaId};

use super::shared::{or_missing, require_account, require_text, validate_url, MessageResponse};
use crate::error::ApiResult;
use crate::extractors::{ApiJson, AuthUser, Owned};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SocialMediaRequest {
    pub name: String,
    pub social_media_url: String,
}

impl SocialMediaRequest {
    fn validate(&self) -> ApiResult<()> {
        require_text(&self.name, "name")?;
        validate_url(&self.social_media_url, "social_media_url")
    }
}

#[derive(Debug, Serialize)]
pub struct SocialMediaResponse {
    pub id: Uuid,
    pub name: String,
    pub social_media_url: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<SocialMediaRow> for SocialMediaResponse {
    fn from(row: SocialMediaRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            social_media_url: row.social_media_url,
            user_id: row.user_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SocialMediaList {
    pub social_medias: Vec<SocialMediaResponse>,
}

/// GET /api/socialmedias
///
/// Only the caller's own links are listed.
#[instrument(skip(state, user), fields(user_id = %user.user_id))]
pub async fn list_social_medias(
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<Json<SocialMediaList>> {
    let links = state.repos.social_medias.list_by_user(user.user_id.0).await?;
    Ok(Json(SocialMediaList {
        social_medias: links.into_iter().map(Into::into).collect(),
    }))
}

/// POST /api/socialmedias
#[instrument(skip(state, user, req), fields(user_id = %user.user_id))]
pub async fn create_social_media(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(req): ApiJson<SocialMediaRequest>,
) -> ApiResult<(StatusCode, Json<SocialMediaResponse>)> {
    req.validate()?;
    require_account(&state, user).await?;

    let link = state
        .repos
        .social_medias
        .create(CreateSocialMedia {
            id: SocialMediaId::new().0,
            user_id: user.user_id.0,
            name: req.name,
            social_media_url: req.social_media_url,
        })
        .await
        .map_err(or_missing(AuthError::Unauthorized))?;

    Ok((StatusCode::CREATED, Json(link.into())))
}

/// PUT /api/socialmedias/{socialMediaId}
#[instrument(skip(state, owned, req), fields(user_id = %owned.user_id, social_media_id = %owned.id))]
pub async fn update_social_media(
    State(state): State<AppState>,
    owned: Owned<SocialMediaId>,
    ApiJson(req): ApiJson<SocialMediaRequest>,
) -> ApiResult<Json<SocialMediaResponse>> {
    req.validate()?;

    let link = state
        .repos
        .social_medias
        .update(
            owned.id.0,
            UpdateSocialMedia {
                name: req.name,
                social_media_url: req.social_media_url,
            },
        )
        .await?
        .ok_or(AuthError::NotFound(ResourceKind::SocialMedia))?;

    Ok(Json(link.into()))
}

/// DELETE /api/socialmedias/{socialMediaId}
#[instrument(skip(state, owned), fields(user_id = %owned.user_id, social_media_id = %owned.id))]
pub async fn delete_social_media(
    State(state): State<AppState>,
    owned: Owned<SocialMediaId>,
) -> ApiResult<Json<MessageResponse>> {
    if !state.repos.social_medias.delete(owned.id.0).await? {
        return Err(AuthError::NotFound(ResourceKind::SocialMedia).into());
    }

    Ok(Json(MessageResponse {
        message: "Your social media has been successfully deleted",
    }))
}
