//! Bundle of repository handles shared by services

use std::sync::Arc;

use mygram_types::{CommentId, PhotoId, ResourceId, SocialMediaId};

use crate::memory::*;
use crate::pg::*;
use crate::pool::DbPool;
use crate::repo::*;

/// All repositories behind trait objects, backed by one storage engine
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub credentials: Arc<dyn CredentialRepository>,
    pub photos: Arc<dyn PhotoRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub social_medias: Arc<dyn SocialMediaRepository>,
}

impl Repositories {
    /// PostgreSQL-backed repositories sharing one pool
    pub fn postgres(pool: DbPool) -> Self {
        Self {
            users: Arc::new(PgUserRepository::new(pool.clone())),
            credentials: Arc::new(PgCredentialRepository::new(pool.clone())),
            photos: Arc::new(PgPhotoRepository::new(pool.clone())),
            comments: Arc::new(PgCommentRepository::new(pool.clone())),
            social_medias: Arc::new(PgSocialMediaRepository::new(pool)),
        }
    }

    /// In-memory repositories sharing one store
    pub fn in_memory() -> Self {
        let store = MemoryStore::new();
        Self {
            users: Arc::new(MemoryUserRepository::new(store.clone())),
            credentials: Arc::new(MemoryCredentialRepository::new(store.clone())),
            photos: Arc::new(MemoryPhotoRepository::new(store.clone())),
            comments: Arc::new(MemoryCommentRepository::new(store.clone())),
            social_medias: Arc::new(MemorySocialMediaRepository::new(store)),
        }
    }
}

/// Select the owner lookup for a resource identifier type
pub trait LookupFor<I: ResourceId> {
    type Lookup: OwnerLookup<I> + ?Sized;

    fn owners(&self) -> &Self::Lookup;
}

impl LookupFor<PhotoId> for Repositories {
    type Lookup = dyn PhotoRepository;

    fn owners(&self) -> &Self::Lookup {
        &*self.photos
    }
}

impl LookupFor<CommentId> for Repositories {
    type Lookup = dyn CommentRepository;

    fn owners(&self) -> &Self::Lookup {
        &*self.comments
    }
}

impl LookupFor<SocialMediaId> for Repositories {
    type Lookup = dyn SocialMediaRepository;

    fn owners(&self) -> &Self::Lookup {
        &*self.social_medias
    }
}
