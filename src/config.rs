use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub store: StoreConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    /// Base URL of the hosted dataset hub.
    pub endpoint: String,
    /// Dataset identifier, e.g. `"lvyn/bot-ppdb"`.
    pub dataset: String,
    /// Local file holding the `TOKEN=<value>` line.
    pub credential_file: PathBuf,
    /// Visibility flag sent with every push.
    #[serde(default = "default_private")]
    pub private: bool,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_private() -> bool {
    true
}
fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:7410".to_string()
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    if config.store.endpoint.trim().is_empty() {
        anyhow::bail!("store.endpoint must not be empty");
    }
    if config.store.dataset.trim().is_empty() {
        anyhow::bail!("store.dataset must not be empty");
    }
    if config.store.timeout_secs == 0 {
        anyhow::bail!("store.timeout_secs must be > 0");
    }

    Ok(config)
}
