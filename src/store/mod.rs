// src/store/mod.rs

//! Typed data access for users, comments and likes.

pub mod memory;
pub mod postgres;

pub use memory::MemoryCommentStore;
pub use postgres::PgCommentStore;

use async_trait::async_trait;
use validator::Validate;

use crate::{
    error::AppError,
    models::{
        comment::{Comment, CommentNode, CommentRecord, NewComment},
        like::{Like, LikeRecord},
        user::{NewUser, User},
    },
    tree::assemble_tree,
};

/// Upper bound on comment length, in characters.
pub const MAX_COMMENT_CHARS: usize = 10000;

/// Storage seam shared by the HTTP layer and the seeding routine.
#[async_trait]
pub trait CommentStore: Send + Sync {
    async fn create_user(&self, new_user: NewUser) -> Result<User, AppError>;

    /// Inserts a comment or reply. The parent, when given, must exist.
    async fn create_comment(&self, new_comment: NewComment) -> Result<Comment, AppError>;

    /// Replaces the text of a comment and marks it as edited.
    async fn edit_comment(&self, id: i64, text: String) -> Result<Comment, AppError>;

    /// Fails with `AppError::Conflict` if the user already liked the comment.
    async fn add_like(&self, user_id: i64, comment_id: i64) -> Result<Like, AppError>;

    /// Returns whether a like was removed.
    async fn remove_like(&self, user_id: i64, comment_id: i64) -> Result<bool, AppError>;

    async fn comment_count(&self) -> Result<i64, AppError>;

    /// Every comment joined with its author.
    async fn fetch_comments(&self) -> Result<Vec<CommentRecord>, AppError>;

    async fn fetch_likes(&self) -> Result<Vec<LikeRecord>, AppError>;

    /// All top-level comments with replies and likes nested, newest first.
    async fn comment_tree(&self) -> Result<Vec<CommentNode>, AppError> {
        let (comments, likes) = tokio::try_join!(self.fetch_comments(), self.fetch_likes())?;
        Ok(assemble_tree(comments, likes))
    }
}

/// Trims comment text and validates the payload. Text is stored as written.
pub(crate) fn prepare_comment(mut new_comment: NewComment) -> Result<NewComment, AppError> {
    new_comment.text = new_comment.text.trim().to_string();
    new_comment.validate()?;
    Ok(new_comment)
}

/// Trimmed text for an edit; same rules as a new comment.
pub(crate) fn prepare_text(text: &str) -> Result<String, AppError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(AppError::BadRequest("Comment text must not be empty".to_string()));
    }
    if text.chars().count() > MAX_COMMENT_CHARS {
        return Err(AppError::BadRequest(
            "Comment must be between 1 and 10000 characters".to_string(),
        ));
    }
    Ok(text.to_string())
}

pub(crate) fn prepare_user(new_user: NewUser) -> Result<NewUser, AppError> {
    let new_user = new_user.normalized();
    new_user.validate()?;
    Ok(new_user)
}

/// Level stored for a new comment: the client's value if supplied, otherwise
/// one deeper than the parent.
pub(crate) fn resolve_level(requested: Option<i32>, parent_level: Option<i32>) -> i32 {
    requested.unwrap_or_else(|| parent_level.map_or(0, |level| level + 1))
}
