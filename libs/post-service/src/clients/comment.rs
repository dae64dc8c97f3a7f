use std::time::Duration;

use entity::prelude::*;
use url::Url;

use crate::error::{IntoResponse, PostServiceError};

/// HTTP client for the comment service's `GET /comments?postId=` endpoint.
#[derive(Clone, Debug)]
pub struct Client {
    base_url: Url,
    http: reqwest::Client,
}

impl Client {
    pub fn new(
        mut base_url: Url,
        timeout: Duration,
    ) -> Result<Self, PostServiceError> {
        // keep any path prefix when joining "comments"
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .into_response("failed to build http client")?;

        Ok(Self { base_url, http })
    }

    pub fn comments_url(&self) -> Result<Url, PostServiceError> {
        self.base_url
            .join("comments")
            .into_response("failed to build comments url")
    }

    /// Comments are returned as sent; their `postId` is not checked.
    pub async fn find_comments_for_post(
        &self,
        post_id: i64,
    ) -> Result<Vec<CommentEntity>, PostServiceError> {
        let response = self
            .http
            .get(self.comments_url()?)
            .query(&[("postId", post_id)])
            .send()
            .await
            .into_response("failed to send")?;

        let status = response.status();
        let text = response.text().await.into_response("failed to get text")?;

        if !status.is_success() {
            return Err(PostServiceError::FailedStatusCode {
                status_code: status,
                message: text,
            });
        }

        parse_comments(&text)
    }
}

/// An empty or `null` body is no comments.
fn parse_comments(text: &str) -> Result<Vec<CommentEntity>, PostServiceError> {
    if text.trim().is_empty() {
        return Ok(vec![]);
    }

    let comments = serde_json::from_str::<Option<Vec<CommentEntity>>>(text)
        .into_response("failed to parse comments")?;

    Ok(comments.unwrap_or_default())
}
