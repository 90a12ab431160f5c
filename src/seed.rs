// src/seed.rs

use chrono::{DateTime, TimeZone, Utc};

use crate::{
    error::AppError,
    models::{comment::NewComment, user::NewUser},
    store::CommentStore,
};

fn avatar(seed: &str) -> String {
    format!("https://api.dicebear.com/7.x/avataaars/svg?seed={seed}")
}

fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 15, hour, minute, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

/// Seeds the demo thread: two top-level comments, the first with two replies.
///
/// Does nothing when the store already holds comments. Returns whether the
/// thread was written.
pub async fn seed_demo_thread(store: &dyn CommentStore) -> Result<bool, AppError> {
    if store.comment_count().await? > 0 {
        return Ok(false);
    }

    tracing::info!("Seeding demo comment thread...");

    let john = store
        .create_user(NewUser::new("John Doe", "john.doe@example.com").with_avatar(avatar("John")))
        .await?;
    let creator = store
        .create_user(
            NewUser::new("Content Creator", "creator@example.com").with_avatar(avatar("Creator")),
        )
        .await?;
    let jane = store
        .create_user(
            NewUser::new("Jane Smith", "jane.smith@example.com").with_avatar(avatar("Jane")),
        )
        .await?;
    let mike = store
        .create_user(
            NewUser::new("Mike Johnson", "mike.johnson@example.com").with_avatar(avatar("Mike")),
        )
        .await?;

    let first = store
        .create_comment(
            NewComment::top_level(
                john.id,
                "This is an amazing video! Thanks for sharing your knowledge.",
            )
            .at(at(10, 0)),
        )
        .await?;
    store
        .create_comment(
            NewComment::reply(creator.id, first.id, "Glad you found it helpful! 🙌").at(at(10, 30)),
        )
        .await?;
    store
        .create_comment(NewComment::reply(jane.id, first.id, "Same here, learned a lot!").at(at(11, 0)))
        .await?;
    store
        .create_comment(
            NewComment::top_level(mike.id, "Could you make a tutorial about React hooks next?")
                .at(at(12, 0)),
        )
        .await?;

    store.add_like(jane.id, first.id).await?;

    tracing::info!("Demo comment thread created successfully.");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryCommentStore;

    #[tokio::test]
    async fn seeds_once() {
        let store = MemoryCommentStore::new();
        assert!(seed_demo_thread(&store).await.unwrap());
        assert!(!seed_demo_thread(&store).await.unwrap());
        assert_eq!(store.comment_count().await.unwrap(), 4);
    }

    #[tokio::test]
    async fn seeded_tree_matches_demo_thread() {
        let store = MemoryCommentStore::new();
        seed_demo_thread(&store).await.unwrap();

        let tree = store.comment_tree().await.unwrap();
        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0].author.name, "Mike Johnson");
        assert!(tree[0].replies.is_empty());

        let first = &tree[1];
        assert_eq!(first.author.name, "John Doe");
        assert_eq!(first.likes.len(), 1);
        let reply_authors: Vec<&str> = first.replies.iter().map(|r| r.author.name.as_str()).collect();
        assert_eq!(reply_authors, ["Jane Smith", "Content Creator"]);
        assert!(first.replies.iter().all(|r| r.level == 1));
    }
}
