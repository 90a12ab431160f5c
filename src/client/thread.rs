// src/client/thread.rs

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::format::is_submittable;
use crate::models::comment::{AuthorSummary, CommentNode, LikeEntry};

/// The user acting in the widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewer {
    pub id: String,
    pub name: String,
    pub avatar: String,
}

impl Viewer {
    fn as_author(&self) -> AuthorSummary {
        AuthorSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            avatar: self.avatar.clone(),
        }
    }
}

/// A comment as held by the widget: the served node plus the viewer's
/// like/dislike state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadComment {
    pub id: String,
    pub text: String,
    pub author: AuthorSummary,
    pub likes: Vec<LikeEntry>,
    pub replies: Vec<ThreadComment>,
    pub level: i32,
    pub is_edited: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_liked: bool,
    pub is_disliked: bool,
}

impl ThreadComment {
    fn from_node(node: CommentNode, viewer_id: &str) -> Self {
        let is_liked = node.likes.iter().any(|like| like.user_id == viewer_id);
        Self {
            id: node.id,
            text: node.text,
            author: node.author,
            likes: node.likes,
            replies: node
                .replies
                .into_iter()
                .map(|reply| Self::from_node(reply, viewer_id))
                .collect(),
            level: node.level,
            is_edited: node.is_edited,
            created_at: node.created_at,
            updated_at: node.updated_at,
            is_liked,
            is_disliked: false,
        }
    }

    fn local(viewer: &Viewer, text: &str, level: i32, now: DateTime<Utc>) -> Self {
        Self {
            id: format!("local-{}", Uuid::new_v4()),
            text: text.trim().to_string(),
            author: viewer.as_author(),
            likes: Vec::new(),
            replies: Vec::new(),
            level,
            is_edited: false,
            created_at: now,
            updated_at: now,
            is_liked: false,
            is_disliked: false,
        }
    }

    pub fn like_count(&self) -> usize {
        self.likes.len()
    }

    fn drop_like_by(&mut self, user_id: &str) {
        self.likes.retain(|like| like.user_id != user_id);
    }
}

/// Local comment tree for one viewer.
#[derive(Debug, Clone)]
pub struct CommentThread {
    viewer: Viewer,
    comments: Vec<ThreadComment>,
}

impl CommentThread {
    pub fn new(viewer: Viewer) -> Self {
        Self {
            viewer,
            comments: Vec::new(),
        }
    }

    /// Hydrates the thread from the `/api/comments` payload.
    pub fn from_server(nodes: Vec<CommentNode>, viewer: Viewer) -> Self {
        let comments = nodes
            .into_iter()
            .map(|node| ThreadComment::from_node(node, &viewer.id))
            .collect();
        Self { viewer, comments }
    }

    pub fn viewer(&self) -> &Viewer {
        &self.viewer
    }

    /// Top-level comments, newest first.
    pub fn comments(&self) -> &[ThreadComment] {
        &self.comments
    }

    /// Number of top-level comments.
    pub fn len(&self) -> usize {
        self.comments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&ThreadComment> {
        find(&self.comments, id)
    }

    /// Adds a top-level comment at the front of the thread.
    /// Blank text is ignored.
    pub fn post_comment(&mut self, text: &str, now: DateTime<Utc>) -> Option<&ThreadComment> {
        if !is_submittable(text) {
            return None;
        }
        let comment = ThreadComment::local(&self.viewer, text, 0, now);
        self.comments.insert(0, comment);
        self.comments.first()
    }

    /// Adds a reply at the front of `parent_id`'s replies, one level deeper
    /// than the parent. Returns `None` for blank text or an unknown parent.
    pub fn post_reply(
        &mut self,
        parent_id: &str,
        text: &str,
        now: DateTime<Utc>,
    ) -> Option<&ThreadComment> {
        if !is_submittable(text) {
            return None;
        }
        let parent = find_mut(&mut self.comments, parent_id)?;
        let reply = ThreadComment::local(&self.viewer, text, parent.level + 1, now);
        parent.replies.insert(0, reply);
        parent.replies.first()
    }

    /// Flips the viewer's like on a comment and returns the new state.
    /// Liking clears a dislike and records a like entry for the viewer;
    /// unliking removes that entry.
    pub fn toggle_like(&mut self, id: &str, now: DateTime<Utc>) -> Option<bool> {
        let viewer_id = self.viewer.id.clone();
        let comment = find_mut(&mut self.comments, id)?;

        if comment.is_liked {
            comment.is_liked = false;
            comment.drop_like_by(&viewer_id);
        } else {
            comment.is_liked = true;
            comment.is_disliked = false;
            comment.drop_like_by(&viewer_id);
            comment.likes.push(LikeEntry {
                user_id: viewer_id,
                timestamp: now,
            });
        }
        Some(comment.is_liked)
    }

    /// Flips the viewer's dislike and returns the new state.
    /// Disliking withdraws an existing like.
    pub fn toggle_dislike(&mut self, id: &str) -> Option<bool> {
        let viewer_id = self.viewer.id.clone();
        let comment = find_mut(&mut self.comments, id)?;

        comment.is_disliked = !comment.is_disliked;
        if comment.is_disliked && comment.is_liked {
            comment.is_liked = false;
            comment.drop_like_by(&viewer_id);
        }
        Some(comment.is_disliked)
    }
}

fn find<'a>(nodes: &'a [ThreadComment], id: &str) -> Option<&'a ThreadComment> {
    for node in nodes {
        if node.id == id {
            return Some(node);
        }
        if let Some(found) = find(&node.replies, id) {
            return Some(found);
        }
    }
    None
}

fn find_mut<'a>(nodes: &'a mut [ThreadComment], id: &str) -> Option<&'a mut ThreadComment> {
    for node in nodes.iter_mut() {
        if node.id == id {
            return Some(node);
        }
        if let Some(found) = find_mut(&mut node.replies, id) {
            return Some(found);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(minutes: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 10, 0, 0).unwrap() + Duration::minutes(minutes)
    }

    fn author(id: &str) -> AuthorSummary {
        AuthorSummary {
            id: id.to_string(),
            name: format!("user {id}"),
            avatar: format!("https://example.com/{id}.svg"),
        }
    }

    fn node(id: &str, level: i32, replies: Vec<CommentNode>, likers: &[&str]) -> CommentNode {
        CommentNode {
            id: id.to_string(),
            text: format!("text {id}"),
            author: author("a"),
            likes: likers
                .iter()
                .map(|u| LikeEntry {
                    user_id: u.to_string(),
                    timestamp: at(0),
                })
                .collect(),
            replies,
            level,
            is_edited: false,
            created_at: at(0),
            updated_at: at(0),
        }
    }

    fn viewer() -> Viewer {
        Viewer {
            id: "me".to_string(),
            name: "Current User".to_string(),
            avatar: "https://api.dicebear.com/7.x/avataaars/svg?seed=Felix".to_string(),
        }
    }

    fn sample() -> CommentThread {
        let nodes = vec![
            node(
                "1",
                0,
                vec![node("2", 1, Vec::new(), &[]), node("3", 1, Vec::new(), &["me"])],
                &["other"],
            ),
            node("4", 0, Vec::new(), &[]),
        ];
        CommentThread::from_server(nodes, viewer())
    }

    #[test]
    fn hydration_marks_viewer_likes() {
        let thread = sample();
        assert!(thread.find("3").unwrap().is_liked);
        assert!(!thread.find("1").unwrap().is_liked);
        assert_eq!(thread.len(), 2);
    }

    #[test]
    fn post_comment_prepends_top_level() {
        let mut thread = sample();
        let id = thread.post_comment("  new one ", at(5)).unwrap().id.clone();

        assert_eq!(thread.len(), 3);
        let first = &thread.comments()[0];
        assert_eq!(first.id, id);
        assert_eq!(first.text, "new one");
        assert_eq!(first.level, 0);
        assert_eq!(first.author.name, "Current User");
        assert!(first.replies.is_empty());
    }

    #[test]
    fn blank_input_is_ignored() {
        let mut thread = sample();
        assert!(thread.post_comment("   ", at(5)).is_none());
        assert!(thread.post_reply("1", "\n", at(5)).is_none());
        assert_eq!(thread.len(), 2);
        assert_eq!(thread.find("1").unwrap().replies.len(), 2);
    }

    #[test]
    fn reply_lands_under_its_parent_only() {
        let mut thread = sample();
        let before = thread.clone();
        let reply_id = thread.post_reply("2", "deep reply", at(5)).unwrap().id.clone();

        let parent = thread.find("2").unwrap();
        assert_eq!(parent.replies.len(), 1);
        assert_eq!(parent.replies[0].id, reply_id);
        assert_eq!(parent.replies[0].level, 2);

        // Nothing else moved.
        assert_eq!(thread.find("3"), before.find("3"));
        assert_eq!(thread.find("4"), before.find("4"));
        assert_eq!(thread.len(), before.len());
    }

    #[test]
    fn reply_is_prepended() {
        let mut thread = sample();
        let reply_id = thread.post_reply("1", "newest", at(5)).unwrap().id.clone();
        let replies = &thread.find("1").unwrap().replies;
        assert_eq!(replies.len(), 3);
        assert_eq!(replies[0].id, reply_id);
        assert_eq!(replies[0].level, 1);
    }

    #[test]
    fn reply_to_unknown_parent_is_none() {
        let mut thread = sample();
        assert!(thread.post_reply("missing", "hello", at(5)).is_none());
    }

    #[test]
    fn like_twice_restores_original_state() {
        let mut thread = sample();
        let original = thread.find("2").unwrap().clone();

        assert_eq!(thread.toggle_like("2", at(5)), Some(true));
        let liked = thread.find("2").unwrap();
        assert_eq!(liked.like_count(), 1);
        assert_eq!(liked.likes[0].user_id, "me");

        assert_eq!(thread.toggle_like("2", at(6)), Some(false));
        assert_eq!(thread.find("2").unwrap(), &original);
    }

    #[test]
    fn unlike_keeps_other_users_likes() {
        let mut thread = sample();
        thread.toggle_like("1", at(5));
        assert_eq!(thread.find("1").unwrap().like_count(), 2);
        thread.toggle_like("1", at(6));
        let comment = thread.find("1").unwrap();
        assert_eq!(comment.like_count(), 1);
        assert_eq!(comment.likes[0].user_id, "other");
    }

    #[test]
    fn dislike_withdraws_like_and_like_clears_dislike() {
        let mut thread = sample();
        assert_eq!(thread.toggle_dislike("3"), Some(true));
        let comment = thread.find("3").unwrap();
        assert!(!comment.is_liked);
        assert!(comment.likes.is_empty());

        assert_eq!(thread.toggle_like("3", at(5)), Some(true));
        let comment = thread.find("3").unwrap();
        assert!(!comment.is_disliked);
        assert_eq!(comment.like_count(), 1);

        assert_eq!(thread.toggle_dislike("4"), Some(true));
        assert_eq!(thread.toggle_dislike("4"), Some(false));
    }

    #[test]
    fn toggles_on_unknown_comment_are_none() {
        let mut thread = sample();
        assert_eq!(thread.toggle_like("missing", at(5)), None);
        assert_eq!(thread.toggle_dislike("missing"), None);
    }
}
