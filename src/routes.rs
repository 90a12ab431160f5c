// src/routes.rs

use axum::{Router, routing::get};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{handlers::comments, state::AppState};

/// Assembles the main application router.
///
/// * `/api/comments` answers `GET` and `POST` with the full comment tree.
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (comment store).
pub fn create_router(state: AppState) -> Router {
    // Any origin may read the thread.
    let cors = CorsLayer::permissive();

    Router::new()
        .route(
            "/api/comments",
            get(comments::get_comments).post(comments::get_comments),
        )
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
