//! Startup and re-authentication fetches.

use crate::store::{AppState, Request};

/// Requests to issue once at startup.
///
/// Validates a persisted token, loads the catalog, and loads the collection
/// when a session exists.
pub fn initial_requests(state: &AppState) -> Vec<Request> {
    let mut requests = Vec::new();
    if state.auth.token.is_some() {
        requests.push(Request::FetchCurrentUser);
    }
    requests.push(Request::FetchBooks);
    if state.auth.is_authenticated {
        requests.push(Request::FetchMyBooks);
    }
    requests
}

/// Requests to issue after an action changed the authentication flag.
///
/// Only the transition into the authenticated state triggers fetches.
pub fn requests_on_auth_change(was_authenticated: bool, state: &AppState) -> Vec<Request> {
    if was_authenticated || !state.auth.is_authenticated {
        return Vec::new();
    }
    let mut requests = Vec::new();
    if state.auth.user.is_none() {
        requests.push(Request::FetchCurrentUser);
    }
    requests.push(Request::FetchMyBooks);
    requests
}
