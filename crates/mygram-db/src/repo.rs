//! Repository traits
//!
//! Define async repository interfaces for database operations.

use async_trait::async_trait;
use uuid::Uuid;

use mygram_types::{CommentId, PhotoId, ResourceId, SocialMediaId, UserId};

use crate::error::DbResult;
use crate::models::*;

/// Owner lookup for one kind of owned resource.
///
/// This is the only storage capability the ownership check needs.
#[async_trait]
pub trait OwnerLookup<I: ResourceId>: Send + Sync {
    /// Return the owner of the resource, or `None` if it does not exist
    async fn find_owner(&self, id: I) -> DbResult<Option<UserId>>;
}

/// User repository trait
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by ID
    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<UserRow>>;

    /// Find a user by email
    async fn find_by_email(&self, email: &str) -> DbResult<Option<UserRow>>;

    /// Find a user by username
    async fn find_by_username(&self, username: &str) -> DbResult<Option<UserRow>>;

    /// Create a new user. Fails with `Conflict` on duplicate email or username.
    async fn create(&self, user: CreateUser) -> DbResult<UserRow>;

    /// Update a user's email, returning the updated row
    async fn update_email(&self, id: Uuid, email: &str) -> DbResult<Option<UserRow>>;

    /// Delete a user together with their credential and owned resources
    async fn delete(&self, id: Uuid) -> DbResult<bool>;
}

/// Create user input
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub age: i32,
}

/// Credential repository trait
///
/// Stores only password hashes, never plaintexts.
#[async_trait]
pub trait CredentialRepository: Send + Sync {
    /// Find the stored hash for a user
    async fn find_hash(&self, user_id: Uuid) -> DbResult<Option<String>>;

    /// Store the first hash for a user
    async fn insert(&self, user_id: Uuid, password_hash: &str) -> DbResult<()>;

    /// Overwrite the hash for a user. Returns false if the user has no credential.
    async fn update(&self, user_id: Uuid, password_hash: &str) -> DbResult<bool>;
}

/// Photo repository trait
#[async_trait]
pub trait PhotoRepository: OwnerLookup<PhotoId> {
    /// List all photos, newest first
    async fn list(&self) -> DbResult<Vec<PhotoRow>>;

    /// Find a photo by ID
    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<PhotoRow>>;

    /// Create a new photo
    async fn create(&self, photo: CreatePhoto) -> DbResult<PhotoRow>;

    /// Update the mutable fields of a photo
    async fn update(&self, id: Uuid, update: UpdatePhoto) -> DbResult<Option<PhotoRow>>;

    /// Delete a photo
    async fn delete(&self, id: Uuid) -> DbResult<bool>;
}

/// Create photo input
#[derive(Debug, Clone)]
pub struct CreatePhoto {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub caption: String,
    pub photo_url: String,
}

/// Update photo input (the owner is not updatable)
#[derive(Debug, Clone)]
pub struct UpdatePhoto {
    pub title: String,
    pub caption: String,
    pub photo_url: String,
}

/// Comment repository trait
#[async_trait]
pub trait CommentRepository: OwnerLookup<CommentId> {
    /// List all comments, newest first
    async fn list(&self) -> DbResult<Vec<CommentRow>>;

    /// Find a comment by ID
    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<CommentRow>>;

    /// Create a new comment
    async fn create(&self, comment: CreateComment) -> DbResult<CommentRow>;

    /// Update a comment's message
    async fn update(&self, id: Uuid, message: &str) -> DbResult<Option<CommentRow>>;

    /// Delete a comment
    async fn delete(&self, id: Uuid) -> DbResult<bool>;
}

/// Create comment input
#[derive(Debug, Clone)]
pub struct CreateComment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub photo_id: Uuid,
    pub message: String,
}

/// Social media repository trait
#[async_trait]
pub trait SocialMediaRepository: OwnerLookup<SocialMediaId> {
    /// List the links owned by a user
    async fn list_by_user(&self, user_id: Uuid) -> DbResult<Vec<SocialMediaRow>>;

    /// Find a link by ID
    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<SocialMediaRow>>;

    /// Create a new link
    async fn create(&self, link: CreateSocialMedia) -> DbResult<SocialMediaRow>;

    /// Update the mutable fields of a link
    async fn update(&self, id: Uuid, update: UpdateSocialMedia)
        -> DbResult<Option<SocialMediaRow>>;

    /// Delete a link
    async fn delete(&self, id: Uuid) -> DbResult<bool>;
}

/// Create social media input
#[derive(Debug, Clone)]
pub struct CreateSocialMedia {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub social_media_url: String,
}

/// Update social media input (the owner is not updatable)
#[derive(Debug, Clone)]
pub struct UpdateSocialMedia {
    pub name: String,
    pub social_media_url: String,
}
