// src/tree.rs

//! Assembly of the nested comment tree from flat rows.
//!
//! The store hands over every comment (joined with its author) and every like
//! in two flat lists. Replies are grouped under their parent id and the tree is
//! built top-down from the comments without a parent. Each sibling list is
//! ordered newest-first; comments whose parent is not in the input are
//! unreachable and dropped.

use std::collections::HashMap;

use crate::models::{
    comment::{AuthorSummary, CommentNode, CommentRecord, LikeEntry},
    like::LikeRecord,
};

/// Builds the list of top-level comments with replies and likes attached.
pub fn assemble_tree(comments: Vec<CommentRecord>, likes: Vec<LikeRecord>) -> Vec<CommentNode> {
    let mut likes_by_comment: HashMap<i64, Vec<LikeRecord>> = HashMap::new();
    for like in likes {
        likes_by_comment.entry(like.comment_id).or_default().push(like);
    }

    let total = comments.len();
    let mut children: HashMap<Option<i64>, Vec<CommentRecord>> = HashMap::new();
    for comment in comments {
        children.entry(comment.parent_id).or_default().push(comment);
    }
    for siblings in children.values_mut() {
        sort_newest_first(siblings);
    }

    let roots = children.remove(&None).unwrap_or_default();
    let tree: Vec<CommentNode> = roots
        .into_iter()
        .map(|record| build_node(record, &mut children, &mut likes_by_comment))
        .collect();

    let orphaned: usize = children.values().map(Vec::len).sum();
    if orphaned > 0 {
        tracing::debug!(
            "Dropped {} of {} comments not reachable from a top-level comment",
            orphaned,
            total
        );
    }

    tree
}

fn build_node(
    record: CommentRecord,
    children: &mut HashMap<Option<i64>, Vec<CommentRecord>>,
    likes_by_comment: &mut HashMap<i64, Vec<LikeRecord>>,
) -> CommentNode {
    let replies = children
        .remove(&Some(record.id))
        .unwrap_or_default()
        .into_iter()
        .map(|reply| build_node(reply, children, likes_by_comment))
        .collect();

    let mut likes = likes_by_comment.remove(&record.id).unwrap_or_default();
    likes.sort_by_key(|like| like.created_at);

    CommentNode {
        id: record.id.to_string(),
        text: record.text,
        author: AuthorSummary {
            id: record.author_id.to_string(),
            name: record.author_name,
            avatar: record.author_avatar,
        },
        likes: likes
            .into_iter()
            .map(|like| LikeEntry {
                user_id: like.user_id.to_string(),
                timestamp: like.created_at,
            })
            .collect(),
        replies,
        level: record.level,
        is_edited: record.is_edited,
        created_at: record.created_at,
        updated_at: record.updated_at,
    }
}

/// Newest first; ties fall back to the higher (later inserted) id.
fn sort_newest_first(records: &mut [CommentRecord]) {
    records.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.cmp(&a.id))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn base() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 10, 0, 0).unwrap()
    }

    fn record(id: i64, parent_id: Option<i64>, level: i32, minutes: i64) -> CommentRecord {
        let at = base() + Duration::minutes(minutes);
        CommentRecord {
            id,
            text: format!("comment {id}"),
            parent_id,
            level,
            is_edited: false,
            created_at: at,
            updated_at: at,
            author_id: 100 + id,
            author_name: format!("user {id}"),
            author_avatar: format!("https://example.com/{id}.svg"),
        }
    }

    fn like(user_id: i64, comment_id: i64, minutes: i64) -> LikeRecord {
        LikeRecord {
            user_id,
            comment_id,
            created_at: base() + Duration::minutes(minutes),
        }
    }

    #[test]
    fn empty_input_gives_empty_tree() {
        assert!(assemble_tree(Vec::new(), Vec::new()).is_empty());
    }

    #[test]
    fn roots_and_replies_are_newest_first() {
        let comments = vec![
            record(1, None, 0, 0),
            record(4, None, 0, 120),
            record(2, Some(1), 1, 30),
            record(3, Some(1), 1, 60),
            record(5, Some(3), 2, 90),
        ];

        let tree = assemble_tree(comments, Vec::new());
        let ids: Vec<&str> = tree.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, ["4", "1"]);

        let replies: Vec<&str> = tree[1].replies.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(replies, ["3", "2"]);

        assert_eq!(tree[1].replies[0].replies.len(), 1);
        assert_eq!(tree[1].replies[0].replies[0].id, "5");
        assert_eq!(tree[1].replies[0].replies[0].level, 2);
    }

    #[test]
    fn leaf_comments_have_empty_replies_and_likes() {
        let tree = assemble_tree(vec![record(1, None, 0, 0)], Vec::new());
        assert!(tree[0].replies.is_empty());
        assert!(tree[0].likes.is_empty());
    }

    #[test]
    fn likes_attach_to_their_comment() {
        let comments = vec![record(1, None, 0, 0), record(2, Some(1), 1, 5)];
        let likes = vec![like(7, 2, 20), like(8, 1, 10), like(9, 2, 15)];

        let tree = assemble_tree(comments, likes);
        assert_eq!(tree[0].likes.len(), 1);
        assert_eq!(tree[0].likes[0].user_id, "8");

        let reply_likers: Vec<&str> = tree[0].replies[0]
            .likes
            .iter()
            .map(|l| l.user_id.as_str())
            .collect();
        assert_eq!(reply_likers, ["9", "7"]);
    }

    #[test]
    fn equal_timestamps_order_by_id() {
        let comments = vec![record(1, None, 0, 0), record(2, None, 0, 0)];
        let tree = assemble_tree(comments, Vec::new());
        assert_eq!(tree[0].id, "2");
        assert_eq!(tree[1].id, "1");
    }

    #[test]
    fn orphans_are_dropped() {
        let comments = vec![record(1, None, 0, 0), record(2, Some(99), 1, 5)];
        let tree = assemble_tree(comments, vec![like(1, 2, 0)]);
        assert_eq!(tree.len(), 1);
        assert!(tree[0].replies.is_empty());
    }

    #[test]
    fn author_fields_are_stringified() {
        let tree = assemble_tree(vec![record(3, None, 0, 0)], Vec::new());
        assert_eq!(tree[0].author.id, "103");
        assert_eq!(tree[0].author.name, "user 3");
    }
}
