//! TUI runner — main loop that wires everything together.
//!
//! Creates terminal, spawns the key reader, runs main TEA loop, and spawns a
//! reveal task whenever the model asks for one.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::time::interval;
use tracing::{info, warn};

use crate::game::{spawn_reveal, RevealEvent, RevealTiming};

use super::app::TuiApp;
use super::event::TuiMessage;
use super::layout;

/// How often the key reader wakes up to notice shutdown.
const KEY_POLL: Duration = Duration::from_millis(50);

/// Spawn any reveal the model has queued.
pub fn dispatch_pending(
    app: &mut TuiApp,
    timing: RevealTiming,
    reveal_tx: &UnboundedSender<RevealEvent>,
) {
    if let Some(plan) = app.pending_reveal.take() {
        let expected = timing.total(plan.kind, plan.sequence.len());
        info!(
            id = plan.id.0,
            len = plan.sequence.len(),
            expected_ms = expected.as_millis() as u64,
            "spawning reveal"
        );
        spawn_reveal(plan, timing, reveal_tx.clone());
    }
}

/// Forward crossterm key events until the receiver goes away.
fn read_keys(tx: UnboundedSender<KeyEvent>) {
    while !tx.is_closed() {
        match event::poll(KEY_POLL) {
            Ok(true) => match event::read() {
                Ok(Event::Key(key)) => {
                    if tx.send(key).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    warn!("terminal read failed: {e}");
                    break;
                }
            },
            Ok(false) => {}
            Err(e) => {
                warn!("terminal poll failed: {e}");
                break;
            }
        }
    }
}

/// Run the TUI main loop. Blocks until quit.
pub async fn run_tui(mut app: TuiApp, timing: RevealTiming) -> anyhow::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let (key_tx, key_rx) = mpsc::unbounded_channel();
    let reader = tokio::task::spawn_blocking(move || read_keys(key_tx));

    let result = event_loop(&mut terminal, &mut app, timing, key_rx).await;

    // Receiver dropped inside event_loop; the reader exits on its next poll.
    let _ = reader.await;

    // Restore terminal
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    result
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut TuiApp,
    timing: RevealTiming,
    mut key_rx: UnboundedReceiver<KeyEvent>,
) -> anyhow::Result<()> {
    let (reveal_tx, mut reveal_rx) = mpsc::unbounded_channel();
    let mut render_interval = interval(Duration::from_millis(33)); // ~30fps

    loop {
        tokio::select! {
            _ = render_interval.tick() => {
                terminal.draw(|f| layout::draw(f, app))?;
            }
            Some(event) = reveal_rx.recv() => {
                app.update(TuiMessage::Reveal(event));
            }
            key = key_rx.recv() => match key {
                Some(key) => app.update(TuiMessage::Input(key)),
                // Reader gave up; nothing left to drive the game.
                None => app.update(TuiMessage::Quit),
            },
        }

        dispatch_pending(app, timing, &reveal_tx);

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
