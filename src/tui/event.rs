//! TUI messages — everything that can change the model.
//!
//! Two producers feed the main loop:
//! - a blocking reader thread forwarding crossterm key events
//! - the reveal task, one at a time, sending display updates
//!
//! The runner wraps both into `TuiMessage`s before calling `update`.

use crossterm::event::KeyEvent;

use crate::game::RevealEvent;

/// Messages that drive the TUI update loop.
#[derive(Debug, Clone)]
pub enum TuiMessage {
    /// Keyboard input.
    Input(KeyEvent),
    /// Display update from the running reveal.
    Reveal(RevealEvent),
    /// Quit the TUI.
    Quit,
}
