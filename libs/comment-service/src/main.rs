use anyhow::Context;
use comment_service::{init_config, serve};
use util::{config_name, init_tracing, load_config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = load_config(&config_name())?;
    let config =
        init_config(&config).context("failed to init comment service config")?;

    serve(config).await
}
