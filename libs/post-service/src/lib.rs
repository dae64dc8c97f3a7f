use std::{net::SocketAddr, time::Duration};

use anyhow::Context;
use axum::{http::StatusCode, routing::get, Json, Router};
use tokio::net::TcpListener;
use toml::{map::Map, Value};
use tower_http::trace::TraceLayer;
use tracing::info;
use url::Url;
use utoipa::OpenApi;

use crate::{
    clients::comment::Client,
    service::{FailurePolicy, PostService},
    store::PostStore,
};

pub mod clients;
pub mod error;
pub mod post;
mod response;
pub mod service;
pub mod store;

pub use error::PostServiceError;

#[derive(Clone, Debug)]
pub struct ApiState {
    service: PostService,
}

impl ApiState {
    pub fn new(service: PostService) -> Self {
        Self { service }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub address: SocketAddr,
    pub comment_service: CommentService,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CommentService {
    pub base_url: Url,
    pub timeout: Duration,
    pub on_failure: FailurePolicy,
}

const DEFAULT_TIMEOUT_SECS: i64 = 5;

#[derive(OpenApi)]
#[openapi(
    paths(post::get_posts, post::get_post),
    components(schemas(
        post::response::PostResp,
        post::response::PostWithCommentsResp,
        post::response::CommentResp
    )),
    tags((name = "posts", description = "Posts composed with their comments"))
)]
struct ApiDoc;

pub fn router(state: ApiState) -> Router {
    // posts
    let post_router = Router::new()
        .route("/", get(post::get_posts))
        .route("/:id", get(post::get_post))
        .fallback(get_404)
        .with_state(state);

    Router::new()
        .route("/healthz", get(|| async { StatusCode::OK }))
        .route(
            "/api-docs/openapi.json",
            get(|| async { Json(ApiDoc::openapi()) }),
        )
        .nest("/posts", post_router)
        .layer(TraceLayer::new_for_http())
        .fallback(get_404)
}

async fn get_404() -> StatusCode {
    StatusCode::NOT_FOUND
}

pub async fn serve(config: Config, store: PostStore) -> anyhow::Result<()> {
    info!(
        task = "start post service",
        address = %config.address,
        comment_service = %config.comment_service.base_url,
    );

    let client = Client::new(
        config.comment_service.base_url.clone(),
        config.comment_service.timeout,
    )?;
    let service =
        PostService::new(store, client, config.comment_service.on_failure);

    let listener = TcpListener::bind(config.address)
        .await
        .with_context(|| format!("failed to bind {}", config.address))?;

    axum::serve(listener, router(ApiState::new(service)))
        .await
        .context("post service stopped")
}

pub fn init_config(config: &Map<String, Value>) -> anyhow::Result<Config> {
    let post_service = config
        .get("post_service")
        .context("failed to get post_service config")?;

    let address = post_service
        .get("address")
        .context("failed to load address config")?
        .as_str()
        .context("failed to parse address config")?
        .parse::<SocketAddr>()
        .context("address config is not a socket address")?;

    let comment_service = post_service
        .get("comment_service")
        .context("failed to get post_service.comment_service config")?;

    let base_url = comment_service
        .get("base_url")
        .context("failed to load base_url config")?
        .as_str()
        .context("failed to parse base_url config")?;
    let base_url =
        parse_base_url(base_url).context("invalid base_url config")?;

    let timeout_secs = comment_service
        .get("timeout_secs")
        .map(|v| v.as_integer().context("failed to parse timeout_secs config"))
        .transpose()?
        .unwrap_or(DEFAULT_TIMEOUT_SECS);
    let timeout_secs = u64::try_from(timeout_secs)
        .ok()
        .filter(|secs| *secs > 0)
        .context("timeout_secs config must be positive")?;

    let on_failure = match comment_service
        .get("on_failure")
        .map(|v| v.as_str().context("failed to parse on_failure config"))
        .transpose()?
    {
        None | Some("fail") => FailurePolicy::Fail,
        Some("empty") => FailurePolicy::Empty,
        Some(other) => anyhow::bail!("unknown on_failure config: {}", other),
    };

    Ok(Config {
        address,
        comment_service: CommentService {
            base_url,
            timeout: Duration::from_secs(timeout_secs),
            on_failure,
        },
    })
}

impl Config {
    /// `COMMENT_SERVICE_BASE_URL` replaces the configured base url.
    pub fn with_env_overrides(mut self) -> anyhow::Result<Self> {
        if let Ok(base_url) = std::env::var("COMMENT_SERVICE_BASE_URL") {
            self.comment_service.base_url = parse_base_url(&base_url)
                .context("invalid COMMENT_SERVICE_BASE_URL")?;
        }

        Ok(self)
    }
}

/// Only absolute http(s) urls can have `comments` joined onto them.
fn parse_base_url(base_url: &str) -> anyhow::Result<Url> {
    let url = Url::parse(base_url)
        .with_context(|| format!("{} is not a url", base_url))?;

    anyhow::ensure!(
        matches!(url.scheme(), "http" | "https") && !url.cannot_be_a_base(),
        "{} is not an http(s) base url",
        base_url
    );

    Ok(url)
}

#[cfg(test)]
mod test {
    use std::{sync::Arc, time::Duration};

    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use chrono::{TimeZone, Utc};
    use comment_service::{id::SequentialIds, store::CommentStore};
    use serde_json::{json, Value};
    use tokio::net::TcpListener;
    use toml::{map::Map, Value as TomlValue};
    use tower::ServiceExt;
    use url::Url;

    use super::{init_config, router, ApiState, Config};
    use crate::{
        clients::comment::Client,
        service::{FailurePolicy, PostService},
        store::PostStore,
    };

    fn parse(text: &str) -> Map<String, TomlValue> {
        toml::from_str(text).unwrap()
    }

    #[test]
    fn test_init_config() {
        // Arrange
        let config = parse(
            r#"
            [post_service]
            address = "0.0.0.0:8080"

            [post_service.comment_service]
            base_url = "http://localhost:8081"
            timeout_secs = 2
            on_failure = "empty"
            "#,
        );

        // Act
        let config = init_config(&config).unwrap();

        // Assert
        assert_eq!(config.address.port(), 8080);
        assert_eq!(
            config.comment_service.base_url.as_str(),
            "http://localhost:8081/"
        );
        assert_eq!(config.comment_service.timeout, Duration::from_secs(2));
        assert_eq!(config.comment_service.on_failure, FailurePolicy::Empty);
    }

    #[test]
    fn test_init_config_defaults() {
        let config = parse(
            r#"
            [post_service]
            address = "0.0.0.0:8080"

            [post_service.comment_service]
            base_url = "http://localhost:8081"
            "#,
        );

        let config = init_config(&config).unwrap();

        assert_eq!(config.comment_service.timeout, Duration::from_secs(5));
        assert_eq!(config.comment_service.on_failure, FailurePolicy::Fail);
    }

    #[test]
    fn test_init_config_requires_base_url() {
        let config = parse(
            r#"
            [post_service]
            address = "0.0.0.0:8080"

            [post_service.comment_service]
            timeout_secs = 2
            "#,
        );

        assert!(init_config(&config).is_err());
    }

    #[test]
    fn test_init_config_rejects_bad_values() {
        let bad_url = parse(
            r#"
            [post_service]
            address = "0.0.0.0:8080"

            [post_service.comment_service]
            base_url = "not a url"
            "#,
        );
        let bad_policy = parse(
            r#"
            [post_service]
            address = "0.0.0.0:8080"

            [post_service.comment_service]
            base_url = "http://localhost:8081"
            on_failure = "retry"
            "#,
        );

        assert!(init_config(&bad_url).is_err());
        assert!(init_config(&bad_policy).is_err());
    }

    #[test]
    fn test_init_config_rejects_base_url_without_scheme() {
        for base_url in ["localhost:8081", "ftp://localhost:8081", "mailto:a@b"] {
            // Arrange
            let config = parse(&format!(
                r#"
                [post_service]
                address = "0.0.0.0:8080"

                [post_service.comment_service]
                base_url = "{}"
                "#,
                base_url
            ));

            // Act
            let result = init_config(&config);

            // Assert
            assert!(result.is_err(), "{} was accepted", base_url);
        }
    }

    #[test]
    fn test_init_config_rejects_non_positive_timeout() {
        for timeout_secs in [0, -1] {
            let config = parse(&format!(
                r#"
                [post_service]
                address = "0.0.0.0:8080"

                [post_service.comment_service]
                base_url = "http://localhost:8081"
                timeout_secs = {}
                "#,
                timeout_secs
            ));

            assert!(init_config(&config).is_err());
        }
    }

    // The only test touching COMMENT_SERVICE_BASE_URL, so the env var is
    // not shared with another test thread.
    #[test]
    fn test_with_env_overrides() {
        // Arrange
        let config = init_config(&parse(
            r#"
            [post_service]
            address = "0.0.0.0:8080"

            [post_service.comment_service]
            base_url = "http://localhost:8081"
            "#,
        ))
        .unwrap();

        // Act
        std::env::remove_var("COMMENT_SERVICE_BASE_URL");
        let unset = config.clone().with_env_overrides();
        std::env::set_var("COMMENT_SERVICE_BASE_URL", "http://comments:9000/api");
        let overridden = config.clone().with_env_overrides();
        std::env::set_var("COMMENT_SERVICE_BASE_URL", "localhost:8081");
        let invalid = config.clone().with_env_overrides();
        std::env::remove_var("COMMENT_SERVICE_BASE_URL");

        // Assert
        assert_eq!(unset.unwrap(), config);
        let overridden: Config = overridden.unwrap();
        assert_eq!(
            overridden.comment_service.base_url.as_str(),
            "http://comments:9000/api"
        );
        assert_eq!(overridden.address, config.address);
        assert!(invalid.is_err());
    }

    #[tokio::test]
    async fn test_get_post_through_comment_service() {
        // Arrange
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        let store = CommentStore::new(Arc::new(SequentialIds::new(77)));
        tokio::spawn(async move {
            axum::serve(
                listener,
                comment_service::router(comment_service::ApiState::new(store)),
            )
            .await
        });

        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let client = Client::new(
            Url::parse(&format!("http://{}", address)).unwrap(),
            Duration::from_secs(5),
        )
        .unwrap();
        let service =
            PostService::new(PostStore::seeded(at), client, FailurePolicy::Fail);
        let app = router(ApiState::new(service));

        // Act
        let response = app
            .oneshot(Request::get("/posts/2").body(Body::empty()).unwrap())
            .await
            .unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            json,
            json!({
                "id": 2,
                "title": "Post 2",
                "content": "Post 2 content",
                "publishDateTime": "2024-05-01T12:00:00Z",
                "comments": [{ "id": 77, "postId": 2, "content": "comment 2" }]
            })
        );
    }

    #[tokio::test]
    async fn test_healthz_and_openapi() {
        // Arrange
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let client = Client::new(
            Url::parse("http://localhost:8081").unwrap(),
            Duration::from_secs(5),
        )
        .unwrap();
        let service =
            PostService::new(PostStore::seeded(at), client, FailurePolicy::Fail);
        let app = router(ApiState::new(service));

        // Act
        let health = app
            .clone()
            .oneshot(Request::get("/healthz").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let docs = app
            .clone()
            .oneshot(
                Request::get("/api-docs/openapi.json")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let missing = app
            .oneshot(Request::get("/missing").body(Body::empty()).unwrap())
            .await
            .unwrap();

        // Assert
        assert_eq!(health.status(), StatusCode::OK);
        assert_eq!(docs.status(), StatusCode::OK);
        let body = to_bytes(docs.into_body(), usize::MAX).await.unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert!(json["paths"]["/posts/{id}"].is_object());
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    }
}
