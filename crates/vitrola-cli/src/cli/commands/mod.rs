//! CLI command handlers.

pub mod albums;
pub mod auth;
pub mod config;
pub mod tui;
pub mod wallet;

use std::sync::Arc;

use anyhow::Result;
use vitrola_core::api::ApiClients;
use vitrola_core::auth::AuthProvider;
use vitrola_core::config::Config;
use vitrola_core::session::FileSessionStore;

/// Service clients plus an auth provider rehydrated from the stored session.
pub struct Session {
    pub clients: ApiClients,
    pub auth: AuthProvider,
}

impl Session {
    /// # Errors
    /// Returns an error if a configured base URL is invalid.
    pub fn open(config: &Config) -> Result<Self> {
        let clients = ApiClients::from_config(config)?;
        let store = Arc::new(FileSessionStore::new());
        let auth = AuthProvider::new(store, clients.users.clone());
        auth.initialize();
        Ok(Self { clients, auth })
    }
}
