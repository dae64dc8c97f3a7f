use std::path::{Path, PathBuf};

use anyhow::Context;
use toml::{map::Map, Value};
use tracing_subscriber::EnvFilter;

pub fn workspace_dir() -> anyhow::Result<PathBuf> {
    let output = std::process::Command::new(env!("CARGO"))
        .arg("locate-project")
        .arg("--workspace")
        .arg("--message-format=plain")
        .output()
        .context("failed to run cargo locate-project")?
        .stdout;
    let cargo_path = std::str::from_utf8(&output)
        .context("cargo locate-project returned non utf-8 output")?;
    let dir = Path::new(cargo_path.trim())
        .parent()
        .context("failed to get workspace dir")?;

    Ok(dir.to_path_buf())
}

/// `Config.toml`, or `Config{CONFIG}.toml` when `CONFIG` is set.
pub fn config_name() -> String {
    match std::env::var("CONFIG") {
        Ok(suffix) if !suffix.is_empty() => format!("Config{}.toml", suffix),
        _ => "Config.toml".to_string(),
    }
}

pub fn load_config(config_name: &str) -> anyhow::Result<Map<String, Value>> {
    let workspace_dir = workspace_dir()?;

    load_config_from(&workspace_dir.join(config_name))
}

pub fn load_config_from(path: &Path) -> anyhow::Result<Map<String, Value>> {
    let config = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    toml::from_str::<Map<String, Value>>(&config)
        .with_context(|| format!("failed to parse {}", path.display()))
}

pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
