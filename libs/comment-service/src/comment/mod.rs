use axum::{
    extract::{Query, State},
    Json,
};
use tracing::info;

pub mod request;
pub mod response;

use crate::ApiState;

use self::{request::GetCommentsParam, response::CommentResp};

/// List comments of a post
#[utoipa::path(
    get,
    path = "/comments",
    tag = "comments",
    responses(
        (status = 200, description = "List comments of a post successfully", body = [CommentResp]),
        (status = 400, description = "postId is missing or not an integer")
    ),
    params(
        GetCommentsParam
    )
)]
pub async fn get_comments(
    State(state): State<ApiState>,
    Query(params): Query<GetCommentsParam>,
) -> Json<Vec<CommentResp>> {
    info!(task = "get comments for post", post_id = params.post_id);

    let comments = state.store.find_by_post_id(params.post_id);

    Json(comments.into_iter().map(CommentResp::from).collect())
}
