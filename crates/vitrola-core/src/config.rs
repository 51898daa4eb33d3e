//! Configuration management for Vitrola.
//!
//! Loads configuration from ${VITROLA_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::api::Service;

/// Returns the default config template with comments.
///
/// This is embedded from default_config.toml at compile time.
/// To update, edit default_config.toml directly.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

/// Merges user config values into the default template.
///
/// This ensures new comments/sections from the template are always present,
/// while preserving user's customized values.
fn merge_with_template(user_config: &str) -> Result<String> {
    use toml_edit::DocumentMut;

    let mut doc: DocumentMut = default_config_template()
        .parse()
        .context("Failed to parse default config template")?;

    let user_doc: DocumentMut = user_config.parse().context("Failed to parse user config")?;

    merge_items(doc.as_table_mut(), user_doc.as_table());

    Ok(doc.to_string())
}

/// Recursively merges items from source table into target table.
fn merge_items(target: &mut toml_edit::Table, source: &toml_edit::Table) {
    use toml_edit::Item;

    for (key, value) in source.iter() {
        match value {
            Item::Value(v) => {
                target[key] = Item::Value(v.clone());
            }
            Item::Table(src_table) => {
                if let Some(Item::Table(target_table)) = target.get_mut(key) {
                    merge_items(target_table, src_table);
                } else {
                    target[key] = Item::Table(src_table.clone());
                }
            }
            Item::ArrayOfTables(src_arr) => {
                target[key] = Item::ArrayOfTables(src_arr.clone());
            }
            Item::None => {}
        }
    }
}

pub mod paths {
    //! Path resolution for Vitrola configuration and data files.
    //!
    //! VITROLA_HOME resolution order:
    //! 1. VITROLA_HOME environment variable (if set)
    //! 2. ~/.config/vitrola (default)

    use std::path::PathBuf;

    /// Returns the Vitrola home directory.
    ///
    /// Checks VITROLA_HOME env var first, falls back to ~/.config/vitrola.
    /// Uses the current directory when no home directory can be determined.
    pub fn vitrola_home() -> PathBuf {
        if let Ok(home) = std::env::var("VITROLA_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir().map_or_else(
            || PathBuf::from(".vitrola"),
            |h| h.join(".config").join("vitrola"),
        )
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        vitrola_home().join("config.toml")
    }

    /// Returns the path to the persisted session entries.
    pub fn session_path() -> PathBuf {
        vitrola_home().join("session.json")
    }

    /// Returns the path to the log file.
    pub fn log_path() -> PathBuf {
        vitrola_home().join("vitrola.log")
    }
}

/// Base URL configuration for one backend service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Base URL including the `/api` prefix.
    pub base_url: Option<String>,
}

impl ServiceConfig {
    /// Returns the configured base URL, treating empty/whitespace as unset.
    pub fn effective_base_url(&self) -> Option<&str> {
        self.base_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

/// Per-service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServicesConfig {
    pub users: ServiceConfig,
    pub albums: ServiceConfig,
}

impl ServicesConfig {
    /// Returns the config section for a service.
    pub fn get(&self, service: Service) -> &ServiceConfig {
        match service {
            Service::Users => &self.users,
            Service::Albums => &self.albums,
        }
    }
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            users: ServiceConfig {
                base_url: Some(Service::Users.default_base_url().to_string()),
            },
            albums: ServiceConfig {
                base_url: Some(Service::Albums.default_base_url().to_string()),
            },
        }
    }
}

/// Purchase flow configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PurchaseConfig {
    /// Delay before the purchase modal closes after a successful sale.
    pub close_delay_ms: u64,
    /// Include the stored password in the sale payload.
    pub send_password: bool,
}

impl Default for PurchaseConfig {
    fn default() -> Self {
        Self {
            close_delay_ms: 1000,
            send_password: false,
        }
    }
}

/// Notification (toast) configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationsConfig {
    pub duration_secs: u64,
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self { duration_secs: 5 }
    }
}

/// Log file configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive (overridden by VITROLA_LOG).
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Timeout for every HTTP request in seconds (0 disables)
    pub request_timeout_secs: u64,

    /// Catalog query used to fill the home carousel
    pub default_search: String,

    /// Backend service base URLs
    pub services: ServicesConfig,

    /// Purchase flow settings
    pub purchase: PurchaseConfig,

    /// Notification settings
    pub notifications: NotificationsConfig,

    /// Log file settings
    pub logging: LoggingConfig,
}

impl Config {
    const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;
    const DEFAULT_SEARCH: &str = "Red hot chilli peppers";

    /// Loads configuration from the default config path.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Saves only the base URL of one service to the config file.
    ///
    /// # Errors
    /// Returns an error if the URL is invalid or the file cannot be written.
    pub fn save_base_url(service: Service, url: &str) -> Result<()> {
        Self::save_base_url_to(&paths::config_path(), service, url)
    }

    /// Saves only the base URL of one service to a specific config file path.
    ///
    /// Creates the file with default template if it doesn't exist.
    /// If file exists, merges user values into the latest template.
    ///
    /// # Errors
    /// Returns an error if the URL is invalid or the file cannot be written.
    pub fn save_base_url_to(path: &Path, service: Service, url: &str) -> Result<()> {
        use toml_edit::{DocumentMut, value};

        let url = url.trim();
        url::Url::parse(url)
            .with_context(|| format!("Invalid {} base URL: {url}", service.display_name()))?;

        let contents = if path.exists() {
            let user_config = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            merge_with_template(&user_config)?
        } else {
            default_config_template().to_string()
        };

        let mut doc: DocumentMut = contents
            .parse()
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        doc["services"][service.id()]["base_url"] = value(url);

        Self::write_config(path, &doc.to_string())
    }

    /// Returns the request timeout, or `None` when disabled.
    pub fn request_timeout(&self) -> Option<Duration> {
        if self.request_timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(self.request_timeout_secs))
        }
    }

    /// Returns the delay before the purchase modal closes after success.
    pub fn purchase_close_delay(&self) -> Duration {
        Duration::from_millis(self.purchase.close_delay_ms)
    }

    /// Returns how long a notification stays on screen.
    pub fn notification_duration(&self) -> Duration {
        Duration::from_secs(self.notifications.duration_secs)
    }

    /// Returns the trimmed carousel query, falling back to the built-in default.
    pub fn effective_default_search(&self) -> &str {
        let trimmed = self.default_search.trim();
        if trimmed.is_empty() {
            Self::DEFAULT_SEARCH
        } else {
            trimmed
        }
    }

    /// Creates a default config file at the given path.
    ///
    /// # Errors
    /// Returns an error if the file already exists or cannot be written.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        Self::write_config(path, default_config_template())
    }

    /// Writes config content to a file, creating parent directories as needed.
    /// Uses atomic write (temp file + rename) to prevent corruption.
    fn write_config(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let tmp_path = path.with_extension("toml.tmp");
        fs::write(&tmp_path, content)
            .with_context(|| format!("Failed to write config to {}", tmp_path.display()))?;
        fs::rename(&tmp_path, path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                tmp_path.display(),
                path.display()
            )
        })?;

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            request_timeout_secs: Self::DEFAULT_REQUEST_TIMEOUT_SECS,
            default_search: Self::DEFAULT_SEARCH.to_string(),
            services: ServicesConfig::default(),
            purchase: PurchaseConfig::default(),
            notifications: NotificationsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}
