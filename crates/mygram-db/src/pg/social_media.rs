//! PostgreSQL social media repository implementation

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use mygram_types::{SocialMediaId, UserId};

use crate::error::{DbError, DbResult};
use crate::models::SocialMediaRow;
use crate::repo::{CreateSocialMedia, OwnerLookup, SocialMediaRepository, UpdateSocialMedia};

/// PostgreSQL social media repository
#[derive(Clone)]
pub struct PgSocialMediaRepository {
    pool: PgPool,
}

impl PgSocialMediaRepository {
    /// Create a new social media repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OwnerLookup<SocialMediaId> for PgSocialMediaRepository {
    async fn find_owner(&self, id: SocialMediaId) -> DbResult<Option<UserId>> {
        let owner =
            sqlx::query_scalar::<_, Uuid>("SELECT user_id FROM social_medias WHERE id = $1")
                .bind(id.0)
                .fetch_optional(&self.pool)
                .await?;

        Ok(owner.map(UserId))
    }
}

#[async_trait]
impl SocialMediaRepository for PgSocialMediaRepository {
    async fn list_by_user(&self, user_id: Uuid) -> DbResult<Vec<SocialMediaRow>> {
        let links = sqlx::query_as::<_, SocialMediaRow>(
            r#"
            SELECT id, name, social_media_url, user_id, created_at, updated_at
            FROM social_medias
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(links)
    }

    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<SocialMediaRow>> {
        let link = sqlx::query_as::<_, SocialMediaRow>(
            r#"
            SELECT id, name, social_media_url, user_id, created_at, updated_at
            FROM social_medias
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(link)
    }

    async fn create(&self, link: CreateSocialMedia) -> DbResult<SocialMediaRow> {
        let row = sqlx::query_as::<_, SocialMediaRow>(
            r#"
            INSERT INTO social_medias (id, name, social_media_url, user_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, social_media_url, user_id, created_at, updated_at
            "#,
        )
        .bind(link.id)
        .bind(&link.name)
        .bind(&link.social_media_url)
        .bind(link.user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(DbError::from_insert)?;

        Ok(row)
    }

    async fn update(
        &self,
        id: Uuid,
        update: UpdateSocialMedia,
    ) -> DbResult<Option<SocialMediaRow>> {
        let row = sqlx::query_as::<_, SocialMediaRow>(
            r#"
            UPDATE social_medias
            SET name = $1, social_media_url = $2, updated_at = NOW()
            WHERE id = $3
            RETURNING id, name, social_media_url, user_id, created_at, updated_at
            "#,
        )
        .bind(&update.name)
        .bind(&update.social_media_url)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn delete(&self, id: Uuid) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM social_medias WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
