//! Config command handlers.

use anyhow::{Context, Result};
use booktrack_core::config;

pub fn path() {
    println!("{}", config::paths::config_path().display());
}

pub fn init() -> Result<()> {
    let config_path = config::paths::config_path();
    config::Config::init(&config_path)
        .with_context(|| format!("init config at {}", config_path.display()))?;
    println!("Created config at {}", config_path.display());
    Ok(())
}

pub fn set_api_url(url: &str) -> Result<()> {
    let url = url.trim();
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        anyhow::bail!("API URL must start with http:// or https://, got '{url}'");
    }
    let config_path = config::paths::config_path();
    config::Config::save_api_url_to(&config_path, url)
        .with_context(|| format!("update config at {}", config_path.display()))?;
    println!("api_url = \"{url}\" ({})", config_path.display());
    Ok(())
}
