//! PostgreSQL photo repository implementation

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use mygram_types::{PhotoId, UserId};

use crate::error::{DbError, DbResult};
use crate::models::PhotoRow;
use crate::repo::{CreatePhoto, OwnerLookup, PhotoRepository, UpdatePhoto};

/// PostgreSQL photo repository
#[derive(Clone)]
pub struct PgPhotoRepository {
    pool: PgPool,
}

impl PgPhotoRepository {
    /// Create a new photo repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OwnerLookup<PhotoId> for PgPhotoRepository {
    async fn find_owner(&self, id: PhotoId) -> DbResult<Option<UserId>> {
        let owner = sqlx::query_scalar::<_, Uuid>("SELECT user_id FROM photos WHERE id = $1")
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await?;

        Ok(owner.map(UserId))
    }
}

#[async_trait]
impl PhotoRepository for PgPhotoRepository {
    async fn list(&self) -> DbResult<Vec<PhotoRow>> {
        let photos = sqlx::query_as::<_, PhotoRow>(
            r#"
            SELECT id, title, caption, photo_url, user_id, created_at, updated_at
            FROM photos
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(photos)
    }

    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<PhotoRow>> {
        let photo = sqlx::query_as::<_, PhotoRow>(
            r#"
            SELECT id, title, caption, photo_url, user_id, created_at, updated_at
            FROM photos
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(photo)
    }

    async fn create(&self, photo: CreatePhoto) -> DbResult<PhotoRow> {
        let row = sqlx::query_as::<_, PhotoRow>(
            r#"
            INSERT INTO photos (id, title, caption, photo_url, user_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, title, caption, photo_url, user_id, created_at, updated_at
            "#,
        )
        .bind(photo.id)
        .bind(&photo.title)
        .bind(&photo.caption)
        .bind(&photo.photo_url)
        .bind(photo.user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(DbError::from_insert)?;

        Ok(row)
    }

    async fn update(&self, id: Uuid, update: UpdatePhoto) -> DbResult<Option<PhotoRow>> {
        let row = sqlx::query_as::<_, PhotoRow>(
            r#"
            UPDATE photos
            SET title = $1, caption = $2, photo_url = $3, updated_at = NOW()
            WHERE id = $4
            RETURNING id, title, caption, photo_url, user_id, created_at, updated_at
            "#,
        )
        .bind(&update.title)
        .bind(&update.caption)
        .bind(&update.photo_url)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn delete(&self, id: Uuid) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM photos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
