use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Represents the 'comments' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub text: String,
    pub author_id: i64,
    /// `None` for top-level comments.
    pub parent_id: Option<i64>,
    pub level: i32,
    pub is_edited: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating a new comment.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewComment {
    #[validate(length(
        min = 1,
        max = 10000,
        message = "Comment must be between 1 and 10000 characters"
    ))]
    pub text: String,

    pub author_id: i64,

    /// Optional: the ID of the comment being replied to.
    #[serde(default)]
    pub parent_id: Option<i64>,

    /// Stored as given; derived from the parent when absent.
    #[serde(default)]
    pub level: Option<i32>,

    /// Explicit creation time for imports and seeding; defaults to now.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl NewComment {
    pub fn top_level(author_id: i64, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            author_id,
            parent_id: None,
            level: None,
            created_at: None,
        }
    }

    pub fn reply(author_id: i64, parent_id: i64, text: impl Into<String>) -> Self {
        Self {
            parent_id: Some(parent_id),
            ..Self::top_level(author_id, text)
        }
    }

    pub fn at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }
}

/// A comment row joined with the fields of its author needed for display.
#[derive(Debug, Clone, FromRow)]
pub struct CommentRecord {
    pub id: i64,
    pub text: String,
    pub parent_id: Option<i64>,
    pub level: i32,
    pub is_edited: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub author_id: i64,
    pub author_name: String,
    pub author_avatar: String,
}

/// Author info embedded in each node of the comment tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorSummary {
    pub id: String,
    pub name: String,
    pub avatar: String,
}

/// A like as it appears inside a comment node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeEntry {
    pub user_id: String,
    pub timestamp: DateTime<Utc>,
}

/// DTO for one node of the nested comment tree returned by `/api/comments`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentNode {
    pub id: String,
    pub text: String,
    pub author: AuthorSummary,
    pub likes: Vec<LikeEntry>,
    /// Always present; empty when the comment has no replies.
    pub replies: Vec<CommentNode>,
    pub level: i32,
    pub is_edited: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_serializes_camel_case_with_empty_replies() {
        let now = Utc::now();
        let node = CommentNode {
            id: "1".to_string(),
            text: "hello".to_string(),
            author: AuthorSummary {
                id: "7".to_string(),
                name: "Jane".to_string(),
                avatar: "https://example.com/a.svg".to_string(),
            },
            likes: vec![LikeEntry {
                user_id: "7".to_string(),
                timestamp: now,
            }],
            replies: Vec::new(),
            level: 0,
            is_edited: false,
            created_at: now,
            updated_at: now,
        };

        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(value["replies"], serde_json::json!([]));
        assert_eq!(value["isEdited"], false);
        assert_eq!(value["likes"][0]["userId"], "7");
        assert!(value.get("createdAt").is_some());
        assert!(value.get("updatedAt").is_some());
    }

    #[test]
    fn reply_builder_sets_parent() {
        let reply = NewComment::reply(3, 9, "thanks");
        assert_eq!(reply.parent_id, Some(9));
        assert_eq!(reply.level, None);
        assert!(reply.validate().is_ok());
        assert!(NewComment::top_level(3, "").validate().is_err());
    }
}
