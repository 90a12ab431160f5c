// src/store/memory.rs

use async_trait::async_trait;
use chrono::Utc;
use sqlx::types::Json;
use tokio::sync::RwLock;

use super::{CommentStore, prepare_comment, prepare_text, prepare_user, resolve_level};
use crate::{
    error::AppError,
    models::{
        comment::{Comment, CommentRecord, NewComment},
        like::{Like, LikeRecord},
        user::{NewUser, User},
    },
};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    comments: Vec<Comment>,
    likes: Vec<Like>,
    last_user_id: i64,
    last_comment_id: i64,
    last_like_id: i64,
}

impl Tables {
    fn user(&self, id: i64) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    fn comment(&self, id: i64) -> Option<&Comment> {
        self.comments.iter().find(|c| c.id == id)
    }
}

/// Process-local store with the same constraints as the PostgreSQL schema.
/// Used for local development (`STORAGE=memory`) and tests.
#[derive(Default)]
pub struct MemoryCommentStore {
    tables: RwLock<Tables>,
}

impl MemoryCommentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CommentStore for MemoryCommentStore {
    async fn create_user(&self, new_user: NewUser) -> Result<User, AppError> {
        let new_user = prepare_user(new_user)?;
        let mut tables = self.tables.write().await;

        if tables.users.iter().any(|u| u.email == new_user.email) {
            return Err(AppError::Conflict(format!(
                "Email '{}' already exists",
                new_user.email
            )));
        }

        tables.last_user_id += 1;
        let now = Utc::now();
        let user = User {
            id: tables.last_user_id,
            name: new_user.name,
            email: new_user.email,
            avatar: new_user.avatar,
            is_verified: new_user.is_verified,
            proofs: Json(new_user.proofs),
            created_at: now,
            updated_at: now,
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn create_comment(&self, new_comment: NewComment) -> Result<Comment, AppError> {
        let new_comment = prepare_comment(new_comment)?;
        let mut tables = self.tables.write().await;

        if tables.user(new_comment.author_id).is_none() {
            return Err(AppError::NotFound("Author not found".to_string()));
        }

        let parent_level = match new_comment.parent_id {
            Some(pid) => Some(
                tables
                    .comment(pid)
                    .ok_or(AppError::NotFound("Parent comment not found".to_string()))?
                    .level,
            ),
            None => None,
        };

        tables.last_comment_id += 1;
        let created_at = new_comment.created_at.unwrap_or_else(Utc::now);
        let comment = Comment {
            id: tables.last_comment_id,
            text: new_comment.text,
            author_id: new_comment.author_id,
            parent_id: new_comment.parent_id,
            level: resolve_level(new_comment.level, parent_level),
            is_edited: false,
            created_at,
            updated_at: created_at,
        };
        tables.comments.push(comment.clone());
        Ok(comment)
    }

    async fn edit_comment(&self, id: i64, text: String) -> Result<Comment, AppError> {
        let text = prepare_text(&text)?;
        let mut tables = self.tables.write().await;

        let comment = tables
            .comments
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(AppError::NotFound("Comment not found".to_string()))?;

        comment.text = text;
        comment.is_edited = true;
        comment.updated_at = Utc::now();
        Ok(comment.clone())
    }

    async fn add_like(&self, user_id: i64, comment_id: i64) -> Result<Like, AppError> {
        let mut tables = self.tables.write().await;

        if tables.user(user_id).is_none() {
            return Err(AppError::NotFound("User not found".to_string()));
        }
        if tables.comment(comment_id).is_none() {
            return Err(AppError::NotFound("Comment not found".to_string()));
        }
        if tables
            .likes
            .iter()
            .any(|l| l.user_id == user_id && l.comment_id == comment_id)
        {
            return Err(AppError::Conflict("Already liked".to_string()));
        }

        tables.last_like_id += 1;
        let like = Like {
            id: tables.last_like_id,
            user_id,
            comment_id,
            created_at: Utc::now(),
        };
        tables.likes.push(like.clone());
        Ok(like)
    }

    async fn remove_like(&self, user_id: i64, comment_id: i64) -> Result<bool, AppError> {
        let mut tables = self.tables.write().await;
        let before = tables.likes.len();
        tables
            .likes
            .retain(|l| !(l.user_id == user_id && l.comment_id == comment_id));
        Ok(tables.likes.len() < before)
    }

    async fn comment_count(&self) -> Result<i64, AppError> {
        Ok(self.tables.read().await.comments.len() as i64)
    }

    async fn fetch_comments(&self) -> Result<Vec<CommentRecord>, AppError> {
        let tables = self.tables.read().await;
        tables
            .comments
            .iter()
            .map(|c| -> Result<CommentRecord, AppError> {
                let author = tables.user(c.author_id).ok_or_else(|| {
                    AppError::InternalServerError(format!("Comment {} has no author", c.id))
                })?;
                Ok(CommentRecord {
                    id: c.id,
                    text: c.text.clone(),
                    parent_id: c.parent_id,
                    level: c.level,
                    is_edited: c.is_edited,
                    created_at: c.created_at,
                    updated_at: c.updated_at,
                    author_id: author.id,
                    author_name: author.name.clone(),
                    author_avatar: author.avatar.clone(),
                })
            })
            .collect()
    }

    async fn fetch_likes(&self) -> Result<Vec<LikeRecord>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.likes.iter().cloned().map(LikeRecord::from).collect())
    }
}
