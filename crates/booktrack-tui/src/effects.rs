//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! The reducer only mutates state and returns effects; it never performs
//! I/O or spawns tasks itself.

use booktrack_core::store::Request;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Run a store request in the background. Its pending action has
    /// already been dispatched.
    Request(Request),

    /// Remove the persisted session token.
    ClearSession,

    /// Open a URL in the system browser.
    OpenBrowser { url: String },
}
