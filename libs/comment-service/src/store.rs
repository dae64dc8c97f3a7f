use std::sync::Arc;

use entity::prelude::*;

use crate::id::IdGenerator;

/// Fabricates comments on demand. Knows nothing about posts, so any post id
/// gets a comment.
#[derive(Clone, Debug)]
pub struct CommentStore {
    ids: Arc<dyn IdGenerator>,
}

impl CommentStore {
    pub fn new(ids: Arc<dyn IdGenerator>) -> Self {
        Self { ids }
    }

    pub fn find_by_post_id(&self, post_id: i64) -> Vec<CommentEntity> {
        vec![CommentEntity::new(
            self.ids.next_id(),
            post_id,
            format!("comment {}", post_id),
        )]
    }
}
