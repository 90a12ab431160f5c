// src/client/mod.rs

//! Client-side model of the comment widget.
//!
//! Mirrors the tree served by `/api/comments`, adds per-viewer like/dislike
//! flags and applies the viewer's actions locally without a round trip.

pub mod format;
pub mod render;
pub mod thread;

pub use render::render_thread;
pub use thread::{CommentThread, ThreadComment, Viewer};
