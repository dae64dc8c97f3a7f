use std::sync::Arc;

use chrono::{DateTime, Utc};
use entity::prelude::*;

/// Read-only set of posts, fixed at construction.
#[derive(Clone, Debug)]
pub struct PostStore {
    posts: Arc<[PostEntity]>,
}

impl PostStore {
    pub fn new(posts: Vec<PostEntity>) -> Self {
        Self {
            posts: posts.into(),
        }
    }

    /// Posts 1, 2 and 3, all published at `published_at`.
    pub fn seeded(published_at: DateTime<Utc>) -> Self {
        Self::new(
            (1..=3)
                .map(|id| {
                    PostEntity::new(
                        id,
                        format!("Post {}", id),
                        format!("Post {} content", id),
                        published_at,
                    )
                })
                .collect(),
        )
    }

    pub fn find_all(&self) -> &[PostEntity] {
        &self.posts
    }

    pub fn find_by_id(&self, id: i64) -> Option<&PostEntity> {
        self.posts.iter().find(|post| post.id == id)
    }
}
