// src/lib.rs

pub mod client;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod seed;
pub mod state;
pub mod store;
pub mod tree;

pub use client::{CommentThread, render_thread};
pub use routes::create_router;
pub use state::AppState;
pub use store::{CommentStore, MemoryCommentStore, PgCommentStore};
