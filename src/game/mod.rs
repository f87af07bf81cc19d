//! The sequence memory game — state machine, digits, and the timed reveal.
//!
//! The controller is synchronous; the reveal is the only piece that touches
//! the clock. The TUI owns both and ferries reveal events into the
//! controller, so exactly one place ever mutates game state.

pub mod controller;
pub mod error;
pub mod reveal;
pub mod sequence;

pub use controller::{GameController, GuessOutcome, Phase, RevealId, RevealKind, RevealPlan};
pub use error::{GameError, GameResult};
pub use reveal::{run_reveal, spawn_reveal, RevealEvent, RevealTiming};
pub use sequence::{parse_guess, DigitSource, RandomDigits, ScriptedDigits, Sequence};
