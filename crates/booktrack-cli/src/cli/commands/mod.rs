//! CLI command handlers.

pub mod auth;
pub mod books;
pub mod collection;
pub mod config;
pub mod ui;

use anyhow::{Result, bail};
use booktrack_core::api::ApiClient;
use booktrack_core::config::Config;
use booktrack_core::session::SessionStore;
use booktrack_core::store::{AppState, Request, StoreError};

/// Store plus client for one command invocation.
pub struct CommandContext {
    pub client: ApiClient,
    pub store: AppState,
}

impl CommandContext {
    pub fn new(config: &Config) -> Self {
        let session = SessionStore::open_default();
        let store = AppState::from_session(&session);
        Self {
            client: ApiClient::new(config.api_url.clone(), session),
            store,
        }
    }

    /// Runs a request through the store, turning a refusal or a rejection
    /// into an error.
    pub async fn run(&mut self, request: Request) -> Result<()> {
        match self.store.run(&self.client, request).await {
            Ok(None) => Ok(()),
            Ok(Some(message)) => bail!(message),
            Err(StoreError::NotAuthenticated) => {
                bail!("Not logged in. Run `booktrack login --email <EMAIL>` first.")
            }
            Err(err) => Err(err.into()),
        }
    }
}
