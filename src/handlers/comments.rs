// src/handlers/comments.rs

use axum::{Json, extract::State, response::IntoResponse};

use crate::{error::AppError, state::SharedStore};

/// Returns every top-level comment with its author, likes and nested replies,
/// newest first.
///
/// Served for both `GET` and `POST`; a request body is ignored.
pub async fn get_comments(State(store): State<SharedStore>) -> Result<impl IntoResponse, AppError> {
    let comments = store
        .comment_tree()
        .await
        .map_err(AppError::into_fetch_failure)?;

    tracing::debug!("Returning {} top-level comments", comments.len());

    Ok(Json(comments))
}
