use chrono::{DateTime, Utc};
use entity::prelude::*;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostResp {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub publish_date_time: DateTime<Utc>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentResp {
    pub id: i64,
    pub post_id: i64,
    pub content: String,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostWithCommentsResp {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub publish_date_time: DateTime<Utc>,
    pub comments: Vec<CommentResp>,
}

impl From<PostEntity> for PostResp {
    fn from(value: PostEntity) -> Self {
        Self {
            id: value.id,
            title: value.title,
            content: value.content,
            publish_date_time: value.publish_date_time,
        }
    }
}

impl From<CommentEntity> for CommentResp {
    fn from(value: CommentEntity) -> Self {
        Self {
            id: value.id,
            post_id: value.post_id,
            content: value.content,
        }
    }
}

impl From<PostWithCommentsEntity> for PostWithCommentsResp {
    fn from(value: PostWithCommentsEntity) -> Self {
        Self {
            id: value.id,
            title: value.title,
            content: value.content,
            publish_date_time: value.publish_date_time,
            comments: value.comments.into_iter().map(CommentResp::from).collect(),
        }
    }
}
