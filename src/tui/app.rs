//! TuiApp — the TEA model.
//!
//! All state lives here. Update receives TuiMessages, mutates state.
//! View reads state to produce ratatui widgets. No side effects in view.
//! Work that needs the runtime (spawning a reveal) is left in
//! `pending_reveal` for the runner to pick up after `update` returns.

use tracing::{debug, info, warn};

use crate::game::{GameController, GameError, GuessOutcome, RevealEvent, RevealPlan};
use crate::score::ScoreStore;

use super::event::TuiMessage;
use super::input::handle_key;

/// Room for separators and stray whitespace beyond one char per digit.
const INPUT_SLACK: usize = 64;

/// Longest guess the input field accepts for a sequence of `len` digits.
/// A well-formed answer needs `2 * len - 1` chars.
pub fn input_capacity(len: usize) -> usize {
    len * 4 + INPUT_SLACK
}

/// The main TUI application state (TEA model).
pub struct TuiApp {
    /// The game state machine.
    pub game: GameController,
    /// Digit currently on the display surface. None = blank.
    pub displayed_digit: Option<u8>,
    /// Text in the guess field.
    pub input: String,
    /// Whether the app should quit.
    pub should_quit: bool,
    /// Reveal waiting to be spawned (set by update, consumed by runner).
    pub pending_reveal: Option<RevealPlan>,
    /// Problem persisting the high score, shown in the status bar.
    pub status_note: Option<String>,
    store: Box<dyn ScoreStore>,
}

impl TuiApp {
    pub fn new(game: GameController, store: Box<dyn ScoreStore>) -> Self {
        Self {
            game,
            displayed_digit: None,
            input: String::new(),
            should_quit: false,
            pending_reveal: None,
            status_note: None,
            store,
        }
    }

    /// Process a message and update state.
    pub fn update(&mut self, msg: TuiMessage) {
        match msg {
            TuiMessage::Input(key) => handle_key(self, key),
            TuiMessage::Reveal(event) => self.apply_reveal(event),
            TuiMessage::Quit => self.should_quit = true,
        }
    }

    /// Start or restart. Ignored while a reveal is running.
    pub fn start_game(&mut self) {
        match self.game.start_game() {
            Ok(plan) => {
                self.displayed_digit = None;
                self.input.clear();
                self.pending_reveal = Some(plan);
            }
            Err(e) => debug!("start ignored: {e}"),
        }
    }

    /// Submit the guess field.
    pub fn submit(&mut self) {
        match self.game.submit_guess(&self.input) {
            Ok(GuessOutcome::Correct { reveal, .. }) => {
                self.input.clear();
                self.pending_reveal = Some(reveal);
            }
            Ok(GuessOutcome::GameOver { new_record, .. }) => {
                self.input.clear();
                if let Some(score) = new_record {
                    self.persist_high_score(score);
                }
            }
            // Leave the text in place so it can be fixed.
            Err(GameError::MalformedGuess { .. }) => {}
            Err(e) => debug!("submit ignored: {e}"),
        }
    }

    /// Type a character into the guess field.
    pub fn push_char(&mut self, c: char) {
        let capacity = input_capacity(self.game.sequence().len());
        if self.game.accepts_input() && self.input.len() < capacity {
            self.input.push(c);
        }
    }

    /// Delete the last character of the guess field.
    pub fn pop_char(&mut self) {
        if self.game.accepts_input() {
            self.input.pop();
        }
    }

    fn apply_reveal(&mut self, event: RevealEvent) {
        match event {
            RevealEvent::Started(id) => {
                self.game.reveal_started(id);
            }
            RevealEvent::Show(id, digit) => {
                if self.game.active_reveal() == Some(id) {
                    self.displayed_digit = Some(digit);
                }
            }
            RevealEvent::Blank(id) => {
                if self.game.active_reveal() == Some(id) {
                    self.displayed_digit = None;
                }
            }
            RevealEvent::Finished(id) => {
                if self.game.reveal_finished(id) {
                    self.displayed_digit = None;
                }
            }
        }
    }

    fn persist_high_score(&mut self, score: u32) {
        match self.store.save(score) {
            Ok(()) => {
                info!(score, "new high score saved");
                self.status_note = None;
            }
            Err(e) => {
                warn!("failed to save high score: {e}");
                self.status_note = Some(format!("High score not saved: {e}"));
            }
        }
    }

    /// Whether the round and high-score badges should be visible.
    pub fn show_badges(&self) -> bool {
        self.game.in_game()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Phase, RevealId, ScriptedDigits};
    use crate::score::{MemoryScoreStore, ScoreError};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn app(digits: &[u8], high_score: u32) -> TuiApp {
        let game = GameController::new(Box::new(ScriptedDigits::new(digits.to_vec())), high_score);
        TuiApp::new(game, Box::new(MemoryScoreStore::with_score(high_score)))
    }

    fn key(code: KeyCode) -> TuiMessage {
        TuiMessage::Input(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn ctrl(c: char) -> TuiMessage {
        TuiMessage::Input(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
    }

    fn type_text(app: &mut TuiApp, text: &str) {
        for c in text.chars() {
            app.update(key(KeyCode::Char(c)));
        }
    }

    /// Play the pending reveal to completion, as the runner would.
    fn run_pending_reveal(app: &mut TuiApp) -> RevealId {
        let plan = app.pending_reveal.take().expect("reveal pending");
        app.update(TuiMessage::Reveal(RevealEvent::Started(plan.id)));
        for &d in plan.sequence.digits() {
            app.update(TuiMessage::Reveal(RevealEvent::Show(plan.id, d)));
            assert_eq!(app.displayed_digit, Some(d));
            app.update(TuiMessage::Reveal(RevealEvent::Blank(plan.id)));
            assert_eq!(app.displayed_digit, None);
        }
        app.update(TuiMessage::Reveal(RevealEvent::Finished(plan.id)));
        plan.id
    }

    struct FailingStore;

    impl ScoreStore for FailingStore {
        fn load(&self) -> Result<u32, ScoreError> {
            Ok(0)
        }

        fn save(&mut self, _score: u32) -> Result<(), ScoreError> {
            Err(ScoreError::Write {
                path: "/nowhere".into(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
            })
        }
    }

    #[test]
    fn app_default_state() {
        let app = app(&[4], 0);
        assert!(!app.should_quit);
        assert!(app.pending_reveal.is_none());
        assert!(app.displayed_digit.is_none());
        assert!(!app.show_badges());
    }

    #[test]
    fn app_quit_on_ctrl_c() {
        let mut app = app(&[4], 0);
        app.update(ctrl('c'));
        assert!(app.should_quit);
    }

    #[test]
    fn app_quit_message() {
        let mut app = app(&[4], 0);
        app.update(TuiMessage::Quit);
        assert!(app.should_quit);
    }

    #[test]
    fn typing_ignored_until_reveal_finishes() {
        let mut app = app(&[4], 0);
        type_text(&mut app, "4");
        assert!(app.input.is_empty());

        app.update(ctrl('s'));
        assert!(app.pending_reveal.is_some());
        type_text(&mut app, "4");
        assert!(app.input.is_empty());

        run_pending_reveal(&mut app);
        type_text(&mut app, "4");
        assert_eq!(app.input, "4");
    }

    #[test]
    fn enter_with_correct_guess_schedules_next_round() {
        let mut app = app(&[4, 2], 0);
        app.update(key(KeyCode::F(2)));
        run_pending_reveal(&mut app);
        type_text(&mut app, "4");
        app.update(key(KeyCode::Enter));

        assert_eq!(app.game.round(), 2);
        assert!(app.input.is_empty());
        let plan = app.pending_reveal.as_ref().expect("next reveal");
        assert_eq!(plan.sequence.digits(), &[4, 2]);
        assert_eq!(app.game.message(), Some("Correct! Get ready for round 2"));
    }

    #[test]
    fn malformed_guess_keeps_text() {
        let mut app = app(&[4], 0);
        app.start_game();
        run_pending_reveal(&mut app);
        type_text(&mut app, "4 5");
        app.update(key(KeyCode::Enter));

        assert_eq!(app.input, "4 5");
        assert_eq!(app.game.phase(), Phase::AwaitingInput);
        assert!(app.pending_reveal.is_none());

        app.update(key(KeyCode::Backspace));
        app.update(key(KeyCode::Backspace));
        assert_eq!(app.input, "4");
    }

    #[test]
    fn game_over_persists_new_record() {
        let game = GameController::new(Box::new(ScriptedDigits::new([4])), 0);
        let mut app = TuiApp::new(game, Box::new(MemoryScoreStore::default()));
        app.start_game();
        run_pending_reveal(&mut app);
        type_text(&mut app, "5");
        app.update(key(KeyCode::Enter));

        assert_eq!(app.game.phase(), Phase::Idle);
        assert_eq!(app.game.high_score(), 1);
        assert_eq!(app.store.load().unwrap(), 1);
        assert!(app.status_note.is_none());
    }

    #[test]
    fn game_over_without_record_leaves_store() {
        let mut app = app(&[4], 9);
        app.start_game();
        run_pending_reveal(&mut app);
        type_text(&mut app, "5");
        app.submit();
        assert_eq!(app.store.load().unwrap(), 9);
    }

    #[test]
    fn save_failure_is_reported_not_fatal() {
        let game = GameController::new(Box::new(ScriptedDigits::new([4])), 0);
        let mut app = TuiApp::new(game, Box::new(FailingStore));
        app.start_game();
        run_pending_reveal(&mut app);
        type_text(&mut app, "5");
        app.submit();

        assert_eq!(app.game.high_score(), 1);
        assert!(app
            .status_note
            .as_deref()
            .unwrap()
            .starts_with("High score not saved"));
    }

    #[test]
    fn start_ignored_during_reveal() {
        let mut app = app(&[4, 8], 0);
        app.start_game();
        let first = app.pending_reveal.take().unwrap();
        app.start_game();
        assert!(app.pending_reveal.is_none());
        assert_eq!(app.game.sequence().digits(), &[4]);
        assert_eq!(app.game.active_reveal(), Some(first.id));
    }

    #[test]
    fn stale_show_events_do_not_touch_display() {
        let mut app = app(&[4], 0);
        app.start_game();
        let id = run_pending_reveal(&mut app);
        app.update(TuiMessage::Reveal(RevealEvent::Show(id, 4)));
        assert_eq!(app.displayed_digit, None);
    }

    #[test]
    fn long_sequences_fit_in_the_guess_field() {
        let digits: Vec<u8> = (0..140).map(|i| (i % 9) as u8 + 1).collect();
        let mut app = app(&digits, 0);
        app.start_game();
        run_pending_reveal(&mut app);
        while app.game.round() <= 130 {
            let answer = app.game.sequence().to_string();
            type_text(&mut app, &answer);
            assert_eq!(app.input, answer, "round {}", app.game.round());
            app.update(key(KeyCode::Enter));
            assert!(
                app.pending_reveal.is_some(),
                "round {}: {:?}",
                app.game.round(),
                app.game.message()
            );
            run_pending_reveal(&mut app);
        }
        assert_eq!(app.game.round(), 131);
        assert_eq!(app.game.phase(), Phase::AwaitingInput);
    }

    #[test]
    fn guess_field_stops_at_capacity() {
        let mut app = app(&[4], 0);
        app.start_game();
        run_pending_reveal(&mut app);
        type_text(&mut app, &" ".repeat(500));
        assert_eq!(app.input.len(), input_capacity(1));
    }

    #[test]
    fn badges_visible_once_started() {
        let mut app = app(&[4], 0);
        app.start_game();
        assert!(app.show_badges());
    }
}
