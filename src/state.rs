use std::sync::Arc;

use crate::store::CommentStore;
use axum::extract::FromRef;

/// Store handle shared by all handlers.
pub type SharedStore = Arc<dyn CommentStore>;

#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
}

impl AppState {
    pub fn new(store: impl CommentStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

impl FromRef<AppState> for SharedStore {
    fn from_ref(state: &AppState) -> Self {
        state.store.clone()
    }
}
