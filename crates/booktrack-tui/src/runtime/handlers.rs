//! Effect handlers for the TUI runtime.
//!
//! These functions perform I/O. They never touch `AppState`; async ones
//! return the `UiEvent` the runtime forwards to the inbox.

use booktrack_core::api::ApiClient;
use booktrack_core::session::SessionStore;
use booktrack_core::store::Request;

use crate::events::UiEvent;

/// Runs a store request and wraps its completion action.
pub async fn run_request(client: ApiClient, request: Request) -> UiEvent {
    let name = request.name();
    let action = request.execute(&client).await;
    if let Some(message) = action.failure() {
        tracing::info!(request = name, message, "request rejected");
    }
    UiEvent::Completed(action)
}

/// Removes the persisted token after a logout.
pub fn clear_session(session: &SessionStore) {
    match session.clear_token() {
        Ok(removed) => tracing::debug!(removed, "session cleared"),
        Err(err) => tracing::warn!(error = %err, "failed to remove persisted session"),
    }
}

/// Opens a cover image URL in the system browser.
pub fn open_in_browser(url: &str) {
    if let Err(err) = open::that(url) {
        tracing::warn!(url, error = %err, "failed to open browser");
    }
}
