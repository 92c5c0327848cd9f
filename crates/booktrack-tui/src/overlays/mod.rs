//! Overlay modules for the TUI.
//!
//! Overlays are modal UI components that temporarily take over keyboard input.
//! Each overlay is self-contained: it owns its state, key handler, and render function.
//!
//! ## Module Structure
//!
//! - `add_book.rs`: Add-book form over the catalog (`a`)
//! - `render_utils.rs`: Shared rendering utilities for overlays and forms

pub mod add_book;
pub mod render_utils;

pub use add_book::AddBookState;
use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;

use crate::state::TuiState;
use crate::update::Command;

// ============================================================================
// OverlayRequest / OverlayTransition / OverlayUpdate
// ============================================================================

/// Requests to open a new overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayRequest {
    AddBook,
}

/// Transition returned by overlay key handlers.
#[derive(Debug, PartialEq, Eq)]
pub enum OverlayTransition {
    Stay,
    Close,
}

/// Update returned by overlay key handlers.
#[derive(Debug)]
pub struct OverlayUpdate {
    pub transition: OverlayTransition,
    pub commands: Vec<Command>,
}

impl OverlayUpdate {
    fn new(transition: OverlayTransition) -> Self {
        Self {
            transition,
            commands: Vec::new(),
        }
    }

    pub fn stay() -> Self {
        Self::new(OverlayTransition::Stay)
    }

    pub fn close() -> Self {
        Self::new(OverlayTransition::Close)
    }

    #[must_use]
    pub fn with_commands(mut self, commands: Vec<Command>) -> Self {
        self.commands = commands;
        self
    }
}

// ============================================================================
// Overlay
// ============================================================================

#[derive(Debug)]
pub enum Overlay {
    AddBook(AddBookState),
}

impl Overlay {
    pub fn render(&self, frame: &mut Frame, area: Rect, tui: &TuiState) {
        match self {
            Overlay::AddBook(s) => s.render(frame, area, tui),
        }
    }

    pub fn handle_key(&mut self, tui: &TuiState, key: KeyEvent) -> OverlayUpdate {
        match self {
            Overlay::AddBook(s) => s.handle_key(tui, key),
        }
    }

    pub fn handle_paste(&mut self, text: &str) {
        match self {
            Overlay::AddBook(s) => s.paste(text),
        }
    }
}

// ============================================================================
// OverlayExt - Extension trait for Option<Overlay>
// ============================================================================

/// Extension trait for `Option<Overlay>` providing convenience render helpers.
pub trait OverlayExt {
    /// Renders the overlay if one is active.
    fn render(&self, frame: &mut Frame, area: Rect, tui: &TuiState);
}

impl OverlayExt for Option<Overlay> {
    fn render(&self, frame: &mut Frame, area: Rect, tui: &TuiState) {
        if let Some(overlay) = self {
            overlay.render(frame, area, tui);
        }
    }
}
