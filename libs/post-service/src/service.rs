use entity::prelude::*;
use tracing::{info, warn};

use crate::{clients::comment::Client, error::PostServiceError, store::PostStore};

/// What `get_post` does when the comment fetch fails.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Propagate the error to the caller.
    #[default]
    Fail,
    /// Log it and attach no comments.
    Empty,
}

#[derive(Clone, Debug)]
pub struct PostService {
    store: PostStore,
    comments: Client,
    on_failure: FailurePolicy,
}

impl PostService {
    pub fn new(
        store: PostStore,
        comments: Client,
        on_failure: FailurePolicy,
    ) -> Self {
        Self {
            store,
            comments,
            on_failure,
        }
    }

    pub fn list_posts(&self) -> Vec<PostEntity> {
        info!(task = "find all posts");

        self.store.find_all().to_vec()
    }

    /// `Ok(None)` when no post has `id`. Otherwise exactly one request goes
    /// to the comment service.
    pub async fn get_post(
        &self,
        id: i64,
    ) -> Result<Option<PostWithCommentsEntity>, PostServiceError> {
        info!(task = "find post", id);

        let Some(post) = self.store.find_by_id(id) else {
            return Ok(None);
        };

        let comments = self.find_comments_for_post(post).await?;

        Ok(Some(PostWithCommentsEntity::merge(post, comments)))
    }

    async fn find_comments_for_post(
        &self,
        post: &PostEntity,
    ) -> Result<Vec<CommentEntity>, PostServiceError> {
        info!(task = "find comments of post", id = post.id);

        match self.comments.find_comments_for_post(post.id).await {
            Ok(comments) => {
                info!(
                    task = "found comments of post",
                    id = post.id,
                    count = comments.len(),
                );
                Ok(comments)
            }
            Err(e) if self.on_failure == FailurePolicy::Empty => {
                warn!(
                    task = "find comments of post",
                    id = post.id,
                    err = e.to_string(),
                );
                Ok(vec![])
            }
            Err(e) => Err(e),
        }
    }
}
