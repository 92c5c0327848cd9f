//! UI event types.
//!
//! Everything the reducer reacts to arrives as a `UiEvent`: terminal input,
//! timer ticks, and store actions produced by finished requests.

use booktrack_core::store::Action;
use crossterm::event::Event;

#[derive(Debug)]
pub enum UiEvent {
    /// Periodic timer; drives the spinner and caps the render rate.
    Tick,
    /// Current terminal size, sent before the other events of a frame.
    Frame { width: u16, height: u16 },
    /// Raw terminal input.
    Terminal(Event),
    /// Completion action of a request, delivered through the inbox.
    Completed(Action),
}
