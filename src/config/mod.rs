mod types;

pub use types::*;

use crate::{Error, Result};
use std::env;
use tracing::debug;

pub async fn load() -> Result<Config> {
    let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());
    load_from(&config_path).await
}

pub async fn load_from(config_path: &str) -> Result<Config> {
    debug!("Loading configuration from: {}", config_path);

    let config_str = tokio::fs::read_to_string(config_path).await?;
    parse(&config_str)
}

pub fn parse(config_str: &str) -> Result<Config> {
    let mut config: Config = serde_yaml::from_str(config_str)?;
    config.api.origin = config.api.origin.trim().trim_end_matches('/').to_string();

    if config.api.origin.trim().is_empty() {
        return Err(Error::config("api.origin must not be empty"));
    }
    if !config.api.base_path.is_empty() && !config.api.base_path.starts_with('/') {
        return Err(Error::config(format!(
            "api.base_path must start with '/': {}",
            config.api.base_path
        )));
    }
    if let DisplayPolicy::Bounded { max: 0 } = config.notifications.policy {
        return Err(Error::config("notifications.policy.max must be at least 1"));
    }

    Ok(config)
}
