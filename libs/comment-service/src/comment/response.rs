use entity::prelude::*;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentResp {
    pub id: i64,
    pub post_id: i64,
    pub content: String,
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
