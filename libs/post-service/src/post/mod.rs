use axum::{
    extract::{Path, State},
    Json,
};
use tracing::info;

pub mod response;

use crate::response::{ApiError, ApiResponse, IntoApiResponse};
use crate::ApiState;

use self::response::{PostResp, PostWithCommentsResp};

/// List all posts
#[utoipa::path(
    get,
    path = "/posts",
    tag = "posts",
    responses(
        (status = 200, description = "List all posts successfully", body = [PostResp])
    )
)]
pub async fn get_posts(State(state): State<ApiState>) -> Json<Vec<PostResp>> {
    info!(task = "get posts");

    let posts = state.service.list_posts();

    Json(posts.into_iter().map(PostResp::from).collect())
}

/// Get a post with its comments
#[utoipa::path(
    get,
    path = "/posts/{id}",
    tag = "posts",
    responses(
        (status = 200, description = "Get a post with comments successfully", body = PostWithCommentsResp),
        (status = 400, description = "id is not an integer"),
        (status = 404, description = "No post has the given id"),
        (status = 500, description = "Fetching comments failed")
    ),
    params(
        ("id" = i64, Path, description = "post id"),
    )
)]
pub async fn get_post(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
) -> ApiResponse<Json<PostWithCommentsResp>> {
    info!(task = "get post", id);

    let post = state
        .service
        .get_post(id)
        .await
        .into_response("failed to get post")?;

    let Some(post) = post else {
        return Err(ApiError::NotFound);
    };

    Ok(Json(PostWithCommentsResp::from(post)))
}
