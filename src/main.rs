use anyhow::Context;
use chrono::Utc;
use post_service::store::PostStore;
use tokio::try_join;
use tracing::info;
use util::{config_name, init_tracing, load_config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = load_config(&config_name())?;
    let comment_config = comment_service::init_config(&config)
        .context("failed to init comment service config")?;
    let post_config = post_service::init_config(&config)
        .context("failed to init post service config")?
        .with_env_overrides()?;

    info!(task = "start services", config = config_name());

    run(comment_config, post_config, PostStore::seeded(Utc::now())).await
}

/// Serves both services until the first one fails.
async fn run(
    comment_config: comment_service::Config,
    post_config: post_service::Config,
    store: PostStore,
) -> anyhow::Result<()> {
    try_join!(
        comment_service::serve(comment_config),
        post_service::serve(post_config, store)
    )?;

    Ok(())
}
