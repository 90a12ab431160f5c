// src/store/postgres.rs

use async_trait::async_trait;
use sqlx::{PgPool, types::Json};

use super::{CommentStore, prepare_comment, prepare_text, prepare_user, resolve_level};
use crate::{
    error::AppError,
    models::{
        comment::{Comment, CommentRecord, NewComment},
        like::{Like, LikeRecord},
        user::{NewUser, User},
    },
};

/// `CommentStore` backed by the PostgreSQL schema in `migrations/`.
#[derive(Clone)]
pub struct PgCommentStore {
    pool: PgPool,
}

impl PgCommentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Applies the embedded migrations.
    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await
    }
}

#[async_trait]
impl CommentStore for PgCommentStore {
    async fn create_user(&self, new_user: NewUser) -> Result<User, AppError> {
        let new_user = prepare_user(new_user)?;

        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, avatar, is_verified, proofs)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, email, avatar, is_verified, proofs, created_at, updated_at
            "#,
        )
        .bind(&new_user.name)
        .bind(&new_user.email)
        .bind(&new_user.avatar)
        .bind(new_user.is_verified)
        .bind(Json(&new_user.proofs))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match AppError::from(e) {
            AppError::Conflict(_) => {
                AppError::Conflict(format!("Email '{}' already exists", new_user.email))
            }
            other => {
                tracing::error!("Failed to create user: {:?}", other);
                other
            }
        })
    }

    async fn create_comment(&self, new_comment: NewComment) -> Result<Comment, AppError> {
        let new_comment = prepare_comment(new_comment)?;

        let parent_level = match new_comment.parent_id {
            Some(pid) => Some(
                sqlx::query_scalar::<_, i32>("SELECT level FROM comments WHERE id = $1")
                    .bind(pid)
                    .fetch_optional(&self.pool)
                    .await?
                    .ok_or(AppError::NotFound("Parent comment not found".to_string()))?,
            ),
            None => None,
        };
        let level = resolve_level(new_comment.level, parent_level);

        sqlx::query_as::<_, Comment>(
            r#"
            INSERT INTO comments (text, author_id, parent_id, level, created_at, updated_at)
            VALUES ($1, $2, $3, $4, COALESCE($5, NOW()), COALESCE($5, NOW()))
            RETURNING id, text, author_id, parent_id, level, is_edited, created_at, updated_at
            "#,
        )
        .bind(&new_comment.text)
        .bind(new_comment.author_id)
        .bind(new_comment.parent_id)
        .bind(level)
        .bind(new_comment.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match AppError::from(e) {
            // The only foreign key left unchecked at this point is the author.
            AppError::NotFound(_) => AppError::NotFound("Author not found".to_string()),
            other => {
                tracing::error!("Failed to create comment: {:?}", other);
                other
            }
        })
    }

    async fn edit_comment(&self, id: i64, text: String) -> Result<Comment, AppError> {
        let text = prepare_text(&text)?;

        sqlx::query_as::<_, Comment>(
            r#"
            UPDATE comments
            SET text = $1, is_edited = TRUE, updated_at = NOW()
            WHERE id = $2
            RETURNING id, text, author_id, parent_id, level, is_edited, created_at, updated_at
            "#,
        )
        .bind(text)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::NotFound("Comment not found".to_string()))
    }

    async fn add_like(&self, user_id: i64, comment_id: i64) -> Result<Like, AppError> {
        sqlx::query_as::<_, Like>(
            r#"
            INSERT INTO likes (user_id, comment_id)
            VALUES ($1, $2)
            RETURNING id, user_id, comment_id, created_at
            "#,
        )
        .bind(user_id)
        .bind(comment_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match AppError::from(e) {
            AppError::Conflict(_) => AppError::Conflict("Already liked".to_string()),
            AppError::NotFound(_) => AppError::NotFound("User or comment not found".to_string()),
            other => other,
        })
    }

    async fn remove_like(&self, user_id: i64, comment_id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM likes WHERE user_id = $1 AND comment_id = $2")
            .bind(user_id)
            .bind(comment_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn comment_count(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM comments")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn fetch_comments(&self) -> Result<Vec<CommentRecord>, AppError> {
        let records = sqlx::query_as::<_, CommentRecord>(
            r#"
            SELECT
                c.id, c.text, c.parent_id, c.level, c.is_edited,
                c.created_at, c.updated_at,
                u.id AS author_id, u.name AS author_name, u.avatar AS author_avatar
            FROM comments c
            JOIN users u ON c.author_id = u.id
            ORDER BY c.created_at DESC, c.id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    async fn fetch_likes(&self) -> Result<Vec<LikeRecord>, AppError> {
        let likes = sqlx::query_as::<_, LikeRecord>(
            "SELECT user_id, comment_id, created_at FROM likes ORDER BY created_at ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(likes)
    }
}
