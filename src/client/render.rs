// src/client/render.rs

use std::fmt;

use chrono::{DateTime, Utc};

use super::{
    format::{comments_heading, format_timestamp, reply_count_label},
    thread::{CommentThread, ThreadComment},
};

const INDENT: &str = "    ";

/// Plain-text view of a thread, replies indented under their parent.
pub struct ThreadView<'a> {
    thread: &'a CommentThread,
    now: DateTime<Utc>,
}

impl<'a> ThreadView<'a> {
    pub fn new(thread: &'a CommentThread, now: DateTime<Utc>) -> Self {
        Self { thread, now }
    }

    fn write_comment(
        &self,
        f: &mut fmt::Formatter<'_>,
        comment: &ThreadComment,
        depth: usize,
    ) -> fmt::Result {
        let pad = INDENT.repeat(depth);

        write!(
            f,
            "{pad}{} · {}",
            comment.author.name,
            format_timestamp(comment.created_at, self.now)
        )?;
        if comment.is_edited {
            write!(f, " (edited)")?;
        }
        writeln!(f)?;

        for line in comment.text.lines() {
            writeln!(f, "{pad}{line}")?;
        }

        let mut actions = format!("{pad}[{} likes]", comment.like_count());
        if comment.is_liked {
            actions.push_str(" [liked]");
        }
        if comment.is_disliked {
            actions.push_str(" [disliked]");
        }
        if !comment.replies.is_empty() {
            actions.push(' ');
            actions.push_str(&reply_count_label(comment.replies.len()));
        }
        writeln!(f, "{actions}")?;

        for reply in &comment.replies {
            self.write_comment(f, reply, depth + 1)?;
        }
        Ok(())
    }
}

impl fmt::Display for ThreadView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", comments_heading(self.thread.len()))?;
        for comment in self.thread.comments() {
            writeln!(f)?;
            self.write_comment(f, comment, 0)?;
        }
        Ok(())
    }
}

/// Renders the whole thread as indented plain text.
pub fn render_thread(thread: &CommentThread, now: DateTime<Utc>) -> String {
    ThreadView::new(thread, now).to_string()
}
