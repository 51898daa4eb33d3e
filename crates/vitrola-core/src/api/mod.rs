//! HTTP clients for the backend services.

pub mod albums;
pub mod shared;
pub mod users;

use std::str::FromStr;

use anyhow::Result;

pub use albums::AlbumApi;
pub use shared::{ApiError, ApiErrorKind, ApiResult, Credentials, USER_AGENT};
pub use users::UserApi;

use crate::config::Config;

/// Backend services the client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    /// Authentication, profile, signup and wallet.
    Users,
    /// Catalog search, sales and collection.
    Albums,
}

impl Service {
    /// Config section key under `[services]`.
    pub fn id(self) -> &'static str {
        match self {
            Service::Users => "users",
            Service::Albums => "albums",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Service::Users => "user service",
            Service::Albums => "album service",
        }
    }

    /// Environment variable that overrides the configured base URL.
    pub fn env_var(self) -> &'static str {
        match self {
            Service::Users => "VITROLA_USER_API_URL",
            Service::Albums => "VITROLA_ALBUM_API_URL",
        }
    }

    pub fn default_base_url(self) -> &'static str {
        match self {
            Service::Users => "http://localhost:8080/api",
            Service::Albums => "http://localhost:8082/api",
        }
    }

    /// Resolves the effective base URL: env > config > default.
    ///
    /// # Errors
    /// Returns an error if the env or config URL is malformed.
    pub fn resolve_base_url(self, config: &Config) -> Result<String> {
        shared::resolve_base_url(
            config.services.get(self).effective_base_url(),
            self.env_var(),
            self.default_base_url(),
            self.display_name(),
        )
    }
}

impl FromStr for Service {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "users" | "user" => Ok(Service::Users),
            "albums" | "album" => Ok(Service::Albums),
            other => anyhow::bail!("Unknown service '{other}'. Expected 'users' or 'albums'."),
        }
    }
}

/// Both service clients, built from one config.
#[derive(Debug, Clone)]
pub struct ApiClients {
    pub users: UserApi,
    pub albums: AlbumApi,
}

impl ApiClients {
    /// Builds both clients with resolved base URLs and the configured timeout.
    ///
    /// # Errors
    /// Returns an error if a base URL is malformed or the HTTP client cannot be built.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            users: UserApi::from_config(config)?,
            albums: AlbumApi::from_config(config)?,
        })
    }
}
