//! Config command handlers.

use anyhow::{Context, Result};
use vitrola_core::api::Service;
use vitrola_core::config;

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

pub fn set_url(service: &str, url: &str) -> Result<()> {
    let service: Service = service.parse()?;
    config::Config::save_base_url(service, url)
        .with_context(|| format!("set {} base URL", service.display_name()))?;
    println!("Set {} base URL to {}", service.display_name(), url.trim());
    Ok(())
}
