//! In-memory repository implementations
//!
//! Every handle shares one [`MemoryStore`], so deleting a user cascades to
//! their credential and owned resources exactly like the foreign keys in the
//! PostgreSQL schema do.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use uuid::Uuid;

use mygram_types::{CommentId, PhotoId, SocialMediaId, UserId};

use crate::error::{DbError, DbResult};
use crate::models::*;
use crate::repo::*;

/// Shared state behind the in-memory repositories
#[derive(Default)]
pub struct MemoryStore {
    users: DashMap<Uuid, UserRow>,
    by_email: DashMap<String, Uuid>,
    by_username: DashMap<String, Uuid>,
    credentials: DashMap<Uuid, String>,
    photos: DashMap<Uuid, PhotoRow>,
    comments: DashMap<Uuid, CommentRow>,
    social_medias: DashMap<Uuid, SocialMediaRow>,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn remove_photo(&self, id: Uuid) -> bool {
        let removed = self.photos.remove(&id).is_some();
        if removed {
            let before = self.comments.len();
            self.comments.retain(|_, c| c.photo_id != id);
            let removed_comments = before.saturating_sub(self.comments.len());
            tracing::debug!(photo_id = %id, comments = removed_comments, "Removed photo comments");
        }
        removed
    }
}

/// In-memory user repository
#[derive(Clone)]
pub struct MemoryUserRepository {
    store: Arc<MemoryStore>,
}

impl MemoryUserRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<UserRow>> {
        Ok(self.store.users.get(&id).map(|r| r.value().clone()))
    }

    async fn find_by_email(&self, email: &str) -> DbResult<Option<UserRow>> {
        Ok(self
            .store
            .by_email
            .get(email)
            .and_then(|id| self.store.users.get(id.value()).map(|r| r.value().clone())))
    }

    async fn find_by_username(&self, username: &str) -> DbResult<Option<UserRow>> {
        Ok(self
            .store
            .by_username
            .get(username)
            .and_then(|id| self.store.users.get(id.value()).map(|r| r.value().clone())))
    }

    async fn create(&self, user: CreateUser) -> DbResult<UserRow> {
        match self.store.by_email.entry(user.email.clone()) {
            Entry::Occupied(_) => return Err(DbError::Conflict("email".to_string())),
            Entry::Vacant(slot) => {
                slot.insert(user.id);
            }
        }
        match self.store.by_username.entry(user.username.clone()) {
            Entry::Occupied(_) => {
                self.store.by_email.remove(&user.email);
                return Err(DbError::Conflict("username".to_string()));
            }
            Entry::Vacant(slot) => {
                slot.insert(user.id);
            }
        }

        let now = Utc::now();
        let row = UserRow {
            id: user.id,
            username: user.username,
            email: user.email,
            age: user.age,
            created_at: now,
            updated_at: now,
        };
        self.store.users.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update_email(&self, id: Uuid, email: &str) -> DbResult<Option<UserRow>> {
        let Some(current) = self.store.users.get(&id).map(|r| r.email.clone()) else {
            return Ok(None);
        };
        if current != email {
            match self.store.by_email.entry(email.to_string()) {
                Entry::Occupied(_) => return Err(DbError::Conflict("email".to_string())),
                Entry::Vacant(slot) => {
                    slot.insert(id);
                }
            }
            self.store.by_email.remove(&current);
        }

        Ok(self.store.users.get_mut(&id).map(|mut user| {
            user.email = email.to_string();
            user.updated_at = Utc::now();
            user.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> DbResult<bool> {
        let Some((_, user)) = self.store.users.remove(&id) else {
            return Ok(false);
        };
        self.store.by_email.remove(&user.email);
        self.store.by_username.remove(&user.username);
        self.store.credentials.remove(&id);

        let photos: Vec<Uuid> = self
            .store
            .photos
            .iter()
            .filter(|p| p.user_id == id)
            .map(|p| p.id)
            .collect();
        let photo_count = photos.len();
        for photo in photos {
            self.store.remove_photo(photo);
        }
        self.store.comments.retain(|_, c| c.user_id != id);
        self.store.social_medias.retain(|_, s| s.user_id != id);
        tracing::debug!(user_id = %id, photos = photo_count, "Removed user and owned resources");
        Ok(true)
    }
}

/// In-memory credential repository
#[derive(Clone)]
pub struct MemoryCredentialRepository {
    store: Arc<MemoryStore>,
}

impl MemoryCredentialRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl CredentialRepository for MemoryCredentialRepository {
    async fn find_hash(&self, user_id: Uuid) -> DbResult<Option<String>> {
        Ok(self.store.credentials.get(&user_id).map(|h| h.value().clone()))
    }

    async fn insert(&self, user_id: Uuid, password_hash: &str) -> DbResult<()> {
        if !self.store.users.contains_key(&user_id) {
            return Err(DbError::NotFound);
        }
        match self.store.credentials.entry(user_id) {
            Entry::Occupied(_) => Err(DbError::Conflict("user_id".to_string())),
            Entry::Vacant(slot) => {
                slot.insert(password_hash.to_string());
                Ok(())
            }
        }
    }

    async fn update(&self, user_id: Uuid, password_hash: &str) -> DbResult<bool> {
        Ok(self
            .store
            .credentials
            .get_mut(&user_id)
            .map(|mut hash| *hash = password_hash.to_string())
            .is_some())
    }
}

/// In-memory photo repository
#[derive(Clone)]
pub struct MemoryPhotoRepository {
    store: Arc<MemoryStore>,
}

impl MemoryPhotoRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl OwnerLookup<PhotoId> for MemoryPhotoRepository {
    async fn find_owner(&self, id: PhotoId) -> DbResult<Option<UserId>> {
        Ok(self.store.photos.get(&id.0).map(|p| p.owner()))
    }
}

#[async_trait]
impl PhotoRepository for MemoryPhotoRepository {
    async fn list(&self) -> DbResult<Vec<PhotoRow>> {
        let mut photos: Vec<PhotoRow> = self.store.photos.iter().map(|p| p.clone()).collect();
        photos.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(photos)
    }

    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<PhotoRow>> {
        Ok(self.store.photos.get(&id).map(|p| p.clone()))
    }

    async fn create(&self, photo: CreatePhoto) -> DbResult<PhotoRow> {
        if !self.store.users.contains_key(&photo.user_id) {
            return Err(DbError::NotFound);
        }
        let now = Utc::now();
        let row = PhotoRow {
            id: photo.id,
            title: photo.title,
            caption: photo.caption,
            photo_url: photo.photo_url,
            user_id: photo.user_id,
            created_at: now,
            updated_at: now,
        };
        self.store.photos.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update(&self, id: Uuid, update: UpdatePhoto) -> DbResult<Option<PhotoRow>> {
        Ok(self.store.photos.get_mut(&id).map(|mut photo| {
            photo.title = update.title;
            photo.caption = update.caption;
            photo.photo_url = update.photo_url;
            photo.updated_at = Utc::now();
            photo.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> DbResult<bool> {
        Ok(self.store.remove_photo(id))
    }
}

/// In-memory comment repository
#[derive(Clone)]
pub struct MemoryCommentRepository {
    store: Arc<MemoryStore>,
}

impl MemoryCommentRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl OwnerLookup<CommentId> for MemoryCommentRepository {
    async fn find_owner(&self, id: CommentId) -> DbResult<Option<UserId>> {
        Ok(self.store.comments.get(&id.0).map(|c| c.owner()))
    }
}

#[async_trait]
impl CommentRepository for MemoryCommentRepository {
    async fn list(&self) -> DbResult<Vec<CommentRow>> {
        let mut comments: Vec<CommentRow> =
            self.store.comments.iter().map(|c| c.clone()).collect();
        comments.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(comments)
    }

    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<CommentRow>> {
        Ok(self.store.comments.get(&id).map(|c| c.clone()))
    }

    async fn create(&self, comment: CreateComment) -> DbResult<CommentRow> {
        if !self.store.users.contains_key(&comment.user_id)
            || !self.store.photos.contains_key(&comment.photo_id)
        {
            return Err(DbError::NotFound);
        }
        let now = Utc::now();
        let row = CommentRow {
            id: comment.id,
            message: comment.message,
            photo_id: comment.photo_id,
            user_id: comment.user_id,
            created_at: now,
            updated_at: now,
        };
        self.store.comments.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update(&self, id: Uuid, message: &str) -> DbResult<Option<CommentRow>> {
        Ok(self.store.comments.get_mut(&id).map(|mut comment| {
            comment.message = message.to_string();
            comment.updated_at = Utc::now();
            comment.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> DbResult<bool> {
        Ok(self.store.comments.remove(&id).is_some())
    }
}

/// In-memory social media repository
#[derive(Clone)]
pub struct MemorySocialMediaRepository {
    store: Arc<MemoryStore>,
}

impl MemorySocialMediaRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl OwnerLookup<SocialMediaId> for MemorySocialMediaRepository {
    async fn find_owner(&self, id: SocialMediaId) -> DbResult<Option<UserId>> {
        Ok(self.store.social_medias.get(&id.0).map(|s| s.owner()))
    }
}

#[async_trait]
impl SocialMediaRepository for MemorySocialMediaRepository {
    async fn list_by_user(&self, user_id: Uuid) -> DbResult<Vec<SocialMediaRow>> {
        let mut links: Vec<SocialMediaRow> = self
            .store
            .social_medias
            .iter()
            .filter(|s| s.user_id == user_id)
            .map(|s| s.clone())
            .collect();
        links.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(links)
    }

    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<SocialMediaRow>> {
        Ok(self.store.social_medias.get(&id).map(|s| s.clone()))
    }

    async fn create(&self, link: CreateSocialMedia) -> DbResult<SocialMediaRow> {
        if !self.store.users.contains_key(&link.user_id) {
            return Err(DbError::NotFound);
        }
        let now = Utc::now();
        let row = SocialMediaRow {
            id: link.id,
            name: link.name,
            social_media_url: link.social_media_url,
            user_id: link.user_id,
            created_at: now,
            updated_at: now,
        };
        self.store.social_medias.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update(
        &self,
        id: Uuid,
        update: UpdateSocialMedia,
    ) -> DbResult<Option<SocialMediaRow>> {
        Ok(self.store.social_medias.get_mut(&id).map(|mut link| {
            link.name = update.name;
            link.social_media_url = update.social_media_url;
            link.updated_at = Utc::now();
            link.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> DbResult<bool> {
        Ok(self.store.social_medias.remove(&id).is_some())
    }
}
