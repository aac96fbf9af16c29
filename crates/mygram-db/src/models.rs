//! Database row models
//!
//! These types map directly to database rows using SQLx's FromRow derive.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use mygram_types::{CommentId, PhotoId, SocialMediaId, UserId};

/// User row from the database
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub age: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Photo row from the database
#[derive(Debug, Clone, FromRow)]
pub struct PhotoRow {
    pub id: Uuid,
    pub title: String,
    pub caption: String,
    pub photo_url: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Comment row from the database
#[derive(Debug, Clone, FromRow)]
pub struct CommentRow {
    pub id: Uuid,
    pub message: String,
    pub photo_id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Social media link row from the database
#[derive(Debug, Clone, FromRow)]
pub struct SocialMediaRow {
    pub id: Uuid,
    pub name: String,
    pub social_media_url: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Conversion implementations from Row types to mygram-types domain types
impl UserRow {
    /// Convert to domain UserId
    pub fn user_id(&self) -> UserId {
        UserId(self.id)
    }
}

impl PhotoRow {
    pub fn photo_id(&self) -> PhotoId {
        PhotoId(self.id)
    }

    /// Owner of the photo
    pub fn owner(&self) -> UserId {
        UserId(self.user_id)
    }
}

impl CommentRow {
    pub fn comment_id(&self) -> CommentId {
        CommentId(self.id)
    }

    /// Owner of the comment
    pub fn owner(&self) -> UserId {
        UserId(self.user_id)
    }
}

impl SocialMediaRow {
    pub fn social_media_id(&self) -> SocialMediaId {
        SocialMediaId(self.id)
    }

    /// Owner of the link
    pub fn owner(&self) -> UserId {
        UserId(self.user_id)
    }
}
