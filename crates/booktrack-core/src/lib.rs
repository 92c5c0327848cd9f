//! Core BookTrack library (config, session, API client, store, view logic).

pub mod api;
pub mod bootstrap;
pub mod config;
pub mod forms;
pub mod logging;
pub mod session;
pub mod store;
pub mod view;
