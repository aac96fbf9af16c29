//! PostgreSQL comment repository implementation

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use mygram_types::{CommentId, UserId};

use crate::error::{DbError, DbResult};
use crate::models::CommentRow;
use crate::repo::{CommentRepository, CreateComment, OwnerLookup};

/// PostgreSQL comment repository
#[derive(Clone)]
pub struct PgCommentRepository {
    pool: PgPool,
}

impl PgCommentRepository {
    /// Create a new comment repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OwnerLookup<CommentId> for PgCommentRepository {
    async fn find_owner(&self, id: CommentId) -> DbResult<Option<UserId>> {
        let owner = sqlx::query_scalar::<_, Uuid>("SELECT user_id FROM comments WHERE id = $1")
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await?;

        Ok(owner.map(UserId))
    }
}

#[async_trait]
impl CommentRepository for PgCommentRepository {
    async fn list(&self) -> DbResult<Vec<CommentRow>> {
        let comments = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT id, message, photo_id, user_id, created_at, updated_at
            FROM comments
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(comments)
    }

    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<CommentRow>> {
        let comment = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT id, message, photo_id, user_id, created_at, updated_at
            FROM comments
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(comment)
    }

    async fn create(&self, comment: CreateComment) -> DbResult<CommentRow> {
        let row = sqlx::query_as::<_, CommentRow>(
            r#"
            INSERT INTO comments (id, message, photo_id, user_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, message, photo_id, user_id, created_at, updated_at
            "#,
        )
        .bind(comment.id)
        .bind(&comment.message)
        .bind(comment.photo_id)
        .bind(comment.user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(DbError::from_insert)?;

        Ok(row)
    }

    async fn update(&self, id: Uuid, message: &str) -> DbResult<Option<CommentRow>> {
        let row = sqlx::query_as::<_, CommentRow>(
            r#"
            UPDATE comments SET message = $1, updated_at = NOW()
            WHERE id = $2
            RETURNING id, message, photo_id, user_id, created_at, updated_at
            "#,
        )
        .bind(message)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn delete(&self, id: Uuid) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
