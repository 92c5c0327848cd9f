//! Full-screen TUI for BookTrack.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod overlays;
pub mod render;
pub mod route;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, Write, stderr};

use anyhow::Result;
use booktrack_core::api::ApiClient;
use booktrack_core::config::{Config, paths};
use booktrack_core::logging;
use booktrack_core::session::SessionStore;
use booktrack_core::store::AppState as Store;
pub use runtime::TuiRuntime;

use crate::state::AppState;

/// Runs the interactive TUI against the configured API.
///
/// Must be called from a multi-threaded tokio runtime.
///
/// # Errors
/// Fails without a terminal, or when the terminal cannot be driven.
pub fn run_interactive(config: &Config) -> Result<()> {
    if !stderr().is_terminal() {
        anyhow::bail!(
            "The interactive UI requires a terminal.\n\
             Use `booktrack books list` and friends for non-interactive use."
        );
    }

    // Logs go to a file; stderr belongs to the alternate screen.
    let _log_guard = match logging::init_file(&paths::logs_dir(), &config.log_level) {
        Ok(guard) => Some(guard),
        Err(err) => {
            writeln!(stderr(), "Warning: file logging disabled: {err:#}")?;
            None
        }
    };
    tracing::info!(api_url = %config.api_url, "starting interactive session");

    let session = SessionStore::open_default();
    let store = Store::from_session(&session);
    let client = ApiClient::new(config.api_url.clone(), session);
    let state = AppState::new(store, config.collection.default_sort);

    let mut runtime = TuiRuntime::new(state, client)?;
    runtime.run()?;

    tracing::info!("interactive session ended");
    Ok(())
}
