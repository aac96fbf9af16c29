//! Photo handlers

use std::collections::HashMap;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use uuid::Uuid;

use mygram_auth_core::AuthError;
use mygram_db::{CreatePhoto, PhotoRow, UpdatePhoto};
use mygram_types::{PhotoId, ResourceKind};

use super::shared::{
    or_missing, require_account, require_text, validate_string_length, validate_url,
    MessageResponse,
};
use crate::error::ApiResult;
use crate::extractors::{ApiJson, AuthUser, Owned};
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct PhotoRequest {
    pub title: String,
    #[serde(default)]
    pub caption: String,
    pub photo_url: String,
}

impl PhotoRequest {
    fn validate(&self) -> ApiResult<()> {
        require_text(&self.title, "title")?;
        validate_string_length(&self.caption, "caption")?;
        validate_url(&self.photo_url, "photo_url")
    }
}

#[derive(Debug, Serialize)]
pub struct PhotoResponse {
    pub id: Uuid,
    pub title: String,
    pub caption: String,
    pub photo_url: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PhotoRow> for PhotoResponse {
    fn from(row: PhotoRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            caption: row.caption,
            photo_url: row.photo_url,
            user_id: row.user_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Owner details embedded in photo listings
#[derive(Debug, Clone, Serialize)]
pub struct PhotoOwner {
    pub username: String,
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct PhotoListItem {
    #[serde(flatten)]
    pub photo: PhotoResponse,
    pub user: Option<PhotoOwner>,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/photos
#[instrument(skip(state, user), fields(user_id = %user.user_id))]
pub async fn list_photos(
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<Json<Vec<PhotoListItem>>> {
    let photos = state.repos.photos.list().await?;

    let mut owners: HashMap<Uuid, Option<PhotoOwner>> = HashMap::new();
    let mut items = Vec::with_capacity(photos.len());
    for photo in photos {
        if !owners.contains_key(&photo.user_id) {
            let owner = state
                .repos
                .users
                .find_by_id(photo.user_id)
                .await?
                .map(|u| PhotoOwner {
                    username: u.username,
                    email: u.email,
                });
            owners.insert(photo.user_id, owner);
        }
        let user = owners.get(&photo.user_id).cloned().flatten();
        items.push(PhotoListItem {
            photo: photo.into(),
            user,
        });
    }

    Ok(Json(items))
}

/// POST /api/photos
#[instrument(skip(state, user, req), fields(user_id = %user.user_id))]
pub async fn create_photo(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(req): ApiJson<PhotoRequest>,
) -> ApiResult<(StatusCode, Json<PhotoResponse>)> {
    req.validate()?;
    require_account(&state, user).await?;

    let photo = state
        .repos
        .photos
        .create(CreatePhoto {
            id: PhotoId::new().0,
            user_id: user.user_id.0,
            title: req.title,
            caption: req.caption,
            photo_url: req.photo_url,
        })
        .await
        .map_err(or_missing(AuthError::Unauthorized))?;

    Ok((StatusCode::CREATED, Json(photo.into())))
}

/// PUT /api/photos/{photoId}
#[instrument(skip(state, owned, req), fields(user_id = %owned.user_id, photo_id = %owned.id))]
pub async fn update_photo(
    State(state): State<AppState>,
    owned: Owned<PhotoId>,
    ApiJson(req): ApiJson<PhotoRequest>,
) -> ApiResult<Json<PhotoResponse>> {
    req.validate()?;

    let photo = state
        .repos
        .photos
        .update(
            owned.id.0,
            UpdatePhoto {
                title: req.title,
                caption: req.caption,
                photo_url: req.photo_url,
            },
        )
        .await?
        .ok_or(AuthError::NotFound(ResourceKind::Photo))?;

    Ok(Json(photo.into()))
}

/// DELETE /api/photos/{photoId}
#[instrument(skip(state, owned), fields(user_id = %owned.user_id, photo_id = %owned.id))]
pub async fn delete_photo(
    State(state): State<AppState>,
    owned: Owned<PhotoId>,
) -> ApiResult<Json<MessageResponse>> {
    if !state.repos.photos.delete(owned.id.0).await? {
        return Err(AuthError::NotFound(ResourceKind::Photo).into());
    }

    Ok(Json(MessageResponse {
        message: "Your photo has been successfully deleted",
    }))
}
