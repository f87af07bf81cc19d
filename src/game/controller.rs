//! GameController — the round/phase state machine.
//!
//! ```text
//! Idle ──start──▶ Presenting ──reveal finished──▶ AwaitingInput
//!                    ▲                                │
//!                    └──────────── correct ───────────┤
//! Idle ◀───────────── incorrect ──────────────────────┤
//!                     malformed (no change) ◀─────────┘
//! ```
//!
//! Synchronous and runtime-free. Timing lives in [`super::reveal`]; the
//! controller only hands out a [`RevealPlan`] and waits to be told the
//! reveal started and finished.

use tracing::{debug, info, warn};

use super::error::{GameError, GameResult};
use super::sequence::{parse_guess, DigitSource, Sequence};

/// Presentation phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Presenting,
    AwaitingInput,
}

/// Identifies one run of the reveal protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RevealId(pub u64);

/// Whether a reveal opens a game or follows a correct guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealKind {
    /// Starts immediately.
    Opening,
    /// Waits for the advance delay before the first digit.
    NextRound,
}

/// Everything the reveal task needs; a snapshot, not a borrow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealPlan {
    pub id: RevealId,
    pub kind: RevealKind,
    pub sequence: Sequence,
}

/// Result of a well-formed guess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuessOutcome {
    Correct {
        next_round: u32,
        reveal: RevealPlan,
    },
    GameOver {
        rounds_completed: u32,
        sequence: Sequence,
        /// Set when this game beat the previous high score.
        new_record: Option<u32>,
    },
}

pub const INSTRUCTIONS_WELCOME: &str = "Press Start to Begin";
pub const INSTRUCTIONS_PLAY_AGAIN: &str = "Press Start to play again.";

/// The sequence game controller.
pub struct GameController {
    sequence: Sequence,
    round: u32,
    phase: Phase,
    high_score: u32,
    message: Option<String>,
    instructions: String,
    digits: Box<dyn DigitSource>,
    next_reveal_id: u64,
    active_reveal: Option<RevealId>,
}

impl GameController {
    /// Create an idle controller with a previously stored high score.
    pub fn new(digits: Box<dyn DigitSource>, high_score: u32) -> Self {
        Self {
            sequence: Sequence::default(),
            round: 0,
            phase: Phase::Idle,
            high_score,
            message: None,
            instructions: INSTRUCTIONS_WELCOME.to_string(),
            digits,
            next_reveal_id: 0,
            active_reveal: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    /// The reveal currently allowed to drive the display, if any.
    pub fn active_reveal(&self) -> Option<RevealId> {
        self.active_reveal
    }

    /// A game is active from start until a wrong guess.
    pub fn in_game(&self) -> bool {
        self.phase != Phase::Idle
    }

    /// Start/Restart is refused only while a reveal is running.
    pub fn can_start(&self) -> bool {
        self.phase != Phase::Presenting
    }

    pub fn accepts_input(&self) -> bool {
        self.phase == Phase::AwaitingInput
    }

    /// Label for the start action.
    pub fn start_label(&self) -> &'static str {
        if self.in_game() {
            "Restart Game"
        } else {
            "Start Game"
        }
    }

    /// Begin a fresh game with a single random digit.
    pub fn start_game(&mut self) -> GameResult<RevealPlan> {
        if !self.can_start() {
            return Err(GameError::RevealInProgress);
        }
        self.sequence = Sequence::first(self.digits.as_mut());
        self.round = 1;
        self.message = None;
        let restart = self.phase == Phase::AwaitingInput;
        info!(restart, "game started");
        Ok(self.enter_presenting(RevealKind::Opening))
    }

    /// The reveal task is about to show its first digit.
    pub fn reveal_started(&mut self, id: RevealId) {
        if !self.is_current(id) {
            return;
        }
        self.message = None;
        self.instructions = format!("Round {} - Memorize the sequence!", self.sequence.len());
        debug!(id = id.0, len = self.sequence.len(), "reveal started");
    }

    /// The reveal task has shown every digit. Returns whether the
    /// notification was applied.
    pub fn reveal_finished(&mut self, id: RevealId) -> bool {
        if !self.is_current(id) {
            return false;
        }
        self.active_reveal = None;
        self.phase = Phase::AwaitingInput;
        self.instructions = format!(
            "Type the {} numbers separated by spaces.",
            self.sequence.len()
        );
        debug!(id = id.0, "reveal finished, awaiting input");
        true
    }

    /// Check a guess against the current sequence.
    ///
    /// A malformed guess sets the validation message and leaves round,
    /// sequence and phase untouched.
    pub fn submit_guess(&mut self, text: &str) -> GameResult<GuessOutcome> {
        if !self.accepts_input() {
            return Err(GameError::NotAcceptingInput);
        }

        let guess = match parse_guess(text, self.sequence.len()) {
            Ok(guess) => guess,
            Err(e) => {
                debug!(input = text, "malformed guess");
                self.message = Some(e.to_string());
                return Err(e);
            }
        };

        if self.sequence.matches(&guess) {
            self.round += 1;
            self.sequence.extend(self.digits.as_mut());
            self.message = Some(format!("Correct! Get ready for round {}", self.round));
            info!(round = self.round, "correct guess");
            let reveal = self.enter_presenting(RevealKind::NextRound);
            return Ok(GuessOutcome::Correct {
                next_round: self.round,
                reveal,
            });
        }

        let reached = self.round;
        let new_record = (reached > self.high_score).then(|| {
            self.high_score = reached;
            reached
        });
        let rounds_completed = reached.saturating_sub(1);
        self.message = Some(format!(
            "Game over! You remembered {rounds_completed} rounds.\nSequence was: {}",
            self.sequence
        ));
        self.instructions = INSTRUCTIONS_PLAY_AGAIN.to_string();
        self.phase = Phase::Idle;
        self.round = 0;
        info!(reached, high_score = self.high_score, "game over");

        Ok(GuessOutcome::GameOver {
            rounds_completed,
            sequence: self.sequence.clone(),
            new_record,
        })
    }

    fn enter_presenting(&mut self, kind: RevealKind) -> RevealPlan {
        let id = RevealId(self.next_reveal_id);
        self.next_reveal_id += 1;
        self.active_reveal = Some(id);
        self.phase = Phase::Presenting;
        if kind == RevealKind::Opening {
            self.instructions =
                format!("Round {} - Memorize the sequence!", self.sequence.len());
        }
        RevealPlan {
            id,
            kind,
            sequence: self.sequence.clone(),
        }
    }

    fn is_current(&self, id: RevealId) -> bool {
        let current = self.phase == Phase::Presenting && self.active_reveal == Some(id);
        if !current {
            warn!(id = id.0, "ignoring stale reveal notification");
        }
        current
    }
}
