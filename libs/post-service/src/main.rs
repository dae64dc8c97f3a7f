use anyhow::Context;
use chrono::Utc;
use post_service::{init_config, serve, store::PostStore};
use util::{config_name, init_tracing, load_config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = load_config(&config_name())?;
    let config = init_config(&config)
        .context("failed to init post service config")?
        .with_env_overrides()?;

    serve(config, PostStore::seeded(Utc::now())).await
}
