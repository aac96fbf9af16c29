//! Owner lookups for exercising the authorizer without a repository

use async_trait::async_trait;
use dashmap::DashMap;
use mygram_db::{DbError, DbResult, OwnerLookup};
use mygram_types::{ResourceId, UserId};
use std::sync::Arc;

/// In-memory owner table for any resource kind
#[derive(Clone)]
pub struct MockOwnerLookup<I: ResourceId> {
    owners: Arc<DashMap<I, UserId>>,
}

impl<I: ResourceId> Default for MockOwnerLookup<I> {
    fn default() -> Self {
        Self {
            owners: Arc::new(DashMap::new()),
        }
    }
}

#[allow(dead_code)]
impl<I: ResourceId> MockOwnerLookup<I> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `owner` as the owner of `id`
    pub fn insert(&self, id: I, owner: UserId) {
        self.owners.insert(id, owner);
    }
}

#[async_trait]
impl<I: ResourceId> OwnerLookup<I> for MockOwnerLookup<I> {
    async fn find_owner(&self, id: I) -> DbResult<Option<UserId>> {
        Ok(self.owners.get(&id).map(|r| *r.value()))
    }
}

/// Lookup whose storage is always down
pub struct FailingLookup;

#[async_trait]
impl<I: ResourceId> OwnerLookup<I> for FailingLookup {
    async fn find_owner(&self, _: I) -> DbResult<Option<UserId>> {
        Err(DbError::Sqlx(sqlx::Error::PoolTimedOut))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mygram_types::PhotoId;

    #[tokio::test]
    async fn test_mock_lookup_crud() {
        let lookup = MockOwnerLookup::new();
        let id = PhotoId::new();
        let owner = UserId::new();

        assert_eq!(lookup.find_owner(id).await.unwrap(), None);
        lookup.insert(id, owner);
        assert_eq!(lookup.find_owner(id).await.unwrap(), Some(owner));
    }
}
