//! Key binding dispatch for the TUI.
//!
//! | Key              | Action                         |
//! |------------------|--------------------------------|
//! | `Ctrl+S`, `F2`   | Start / Restart game           |
//! | `Enter`          | Submit guess                   |
//! | `Backspace`      | Edit guess                     |
//! | `Esc`, `Ctrl+C`  | Quit                           |
//! | any other char   | Typed into the guess field     |

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::app::TuiApp;

/// Handle a key event, mutating app state.
pub fn handle_key(app: &mut TuiApp, key: KeyEvent) {
    // Windows reports releases too.
    if key.kind == KeyEventKind::Release {
        return;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    // Global bindings
    match key.code {
        KeyCode::Char('c') if ctrl => {
            app.should_quit = true;
            return;
        }
        KeyCode::Esc => {
            app.should_quit = true;
            return;
        }
        KeyCode::Char('s') if ctrl => {
            app.start_game();
            return;
        }
        KeyCode::F(2) => {
            app.start_game();
            return;
        }
        _ => {}
    }

    // Guess field
    match key.code {
        KeyCode::Enter => {
            if app.game.accepts_input() {
                app.submit();
            }
        }
        KeyCode::Backspace => app.pop_char(),
        KeyCode::Char(c) if !ctrl => app.push_char(c),
        _ => {}
    }
}
