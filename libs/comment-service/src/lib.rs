use std::net::SocketAddr;

use anyhow::Context;
use axum::{http::StatusCode, routing::get, Json, Router};
use tokio::net::TcpListener;
use toml::{map::Map, Value};
use tower_http::trace::TraceLayer;
use tracing::info;
use utoipa::OpenApi;

use crate::{id::IdStrategy, store::CommentStore};

pub mod comment;
pub mod id;
pub mod store;

#[derive(Clone, Debug)]
pub struct ApiState {
    store: CommentStore,
}

impl ApiState {
    pub fn new(store: CommentStore) -> Self {
        Self { store }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub address: SocketAddr,
    pub id_strategy: IdStrategy,
}

#[derive(OpenApi)]
#[openapi(
    paths(comment::get_comments),
    components(schemas(comment::response::CommentResp)),
    tags((name = "comments", description = "Synthetic comments by post id"))
)]
struct ApiDoc;

pub fn router(state: ApiState) -> Router {
    // comments
    let comment_router = Router::new()
        .route("/", get(comment::get_comments))
        .fallback(get_404)
        .with_state(state);

    Router::new()
        .route("/healthz", get(|| async { StatusCode::OK }))
        .route(
            "/api-docs/openapi.json",
            get(|| async { Json(ApiDoc::openapi()) }),
        )
        .nest("/comments", comment_router)
        .layer(TraceLayer::new_for_http())
        .fallback(get_404)
}

async fn get_404() -> StatusCode {
    StatusCode::NOT_FOUND
}

pub async fn serve(config: Config) -> anyhow::Result<()> {
    info!(task = "start comment service", address = %config.address);

    let store = CommentStore::new(config.id_strategy.generator());
    let listener = TcpListener::bind(config.address)
        .await
        .with_context(|| format!("failed to bind {}", config.address))?;

    axum::serve(listener, router(ApiState::new(store)))
        .await
        .context("comment service stopped")
}

pub fn init_config(config: &Map<String, Value>) -> anyhow::Result<Config> {
    let comment_service = config
        .get("comment_service")
        .context("failed to get comment_service config")?;

    let address = comment_service
        .get("address")
        .context("failed to load address config")?
        .as_str()
        .context("failed to parse address config")?
        .parse::<SocketAddr>()
        .context("address config is not a socket address")?;

    let strategy = comment_service
        .get("id_strategy")
        .map(|v| v.as_str().context("failed to parse id_strategy config"))
        .transpose()?
        .unwrap_or("random");

    let id_strategy = match strategy {
        "random" => IdStrategy::Random,
        "sequential" => {
            let first_id = comment_service
                .get("first_id")
                .map(|v| v.as_integer().context("failed to parse first_id config"))
                .transpose()?
                .unwrap_or(1);
            IdStrategy::Sequential { first_id }
        }
        other => anyhow::bail!("unknown id_strategy config: {}", other),
    };

    Ok(Config {
        address,
        id_strategy,
    })
}
