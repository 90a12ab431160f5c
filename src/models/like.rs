use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Represents the 'likes' table in the database.
/// At most one row exists per (user_id, comment_id).
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Like {
    pub id: i64,
    pub user_id: i64,
    pub comment_id: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Flat like row used for tree assembly.
#[derive(Debug, Clone, FromRow)]
pub struct LikeRecord {
    pub user_id: i64,
    pub comment_id: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Like> for LikeRecord {
    fn from(like: Like) -> Self {
        Self {
            user_id: like.user_id,
            comment_id: like.comment_id,
            created_at: like.created_at,
        }
    }
}
