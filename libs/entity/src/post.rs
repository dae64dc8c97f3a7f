use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::comment::Comment;

#[derive(Debug, Default, PartialEq, Eq, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub publish_date_time: DateTime<Utc>,
}

impl Post {
    pub fn new(
        id: i64,
        title: impl Into<String>,
        content: impl Into<String>,
        publish_date_time: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            content: content.into(),
            publish_date_time,
        }
    }
}

/// A post merged with the comments fetched for it at read time.
#[derive(Debug, Default, PartialEq, Eq, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostWithComments {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub publish_date_time: DateTime<Utc>,
    pub comments: Vec<Comment>,
}

impl PostWithComments {
    /// Comments are attached as given; their `post_id` is not checked
    /// against the post.
    pub fn merge(post: &Post, comments: Vec<Comment>) -> Self {
        Self {
            id: post.id,
            title: post.title.clone(),
            content: post.content.clone(),
            publish_date_time: post.publish_date_time,
            comments,
        }
    }
}
