//! Single-screen layout.
//!
//! ```text
//! ┌──────────── Memory Master ────────────┐
//! │ Test your memory - remember and repeat │
//! └────────────────────────────────────────┘
//!        [ Round 3 ]  [ High Score: 5 ]
//!     Round 3 - Memorize the sequence!
//!               ┌───────┐
//!               │ █████ │
//!               │    █  │   (display surface)
//!               └───────┘
//! ┌ Guess ─────────────────────────────────┐
//! │ > 4 1 9                                │
//! └────────────────────────────────────────┘
//!      [^S Restart Game]  [Enter Submit]
//!   Correct! Get ready for round 4
//! [watch] Esc:Quit
//! ```

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use super::app::TuiApp;
use super::dashboard::{self, GLYPH_HEIGHT, GLYPH_WIDTH};

/// Widest the game card grows on large terminals.
const CARD_WIDTH: u16 = 64;

/// Prefix of the guess field.
const PROMPT: &str = "> ";

/// Draw the full TUI layout.
pub fn draw(f: &mut Frame, app: &TuiApp) {
    let card = centered_width(f.area(), CARD_WIDTH);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),                // title
            Constraint::Length(1),                // badges
            Constraint::Length(1),                // spacer
            Constraint::Length(1),                // instructions
            Constraint::Length(1),                // spacer
            Constraint::Length(GLYPH_HEIGHT + 2), // display surface
            Constraint::Length(1),                // spacer
            Constraint::Length(3),                // input
            Constraint::Length(1),                // buttons
            Constraint::Min(2),                   // message
            Constraint::Length(1),                // status bar
        ])
        .split(card);

    draw_title(f, rows[0]);
    if app.show_badges() {
        draw_badges(f, app, rows[1]);
    }
    draw_instructions(f, app, rows[3]);
    draw_display(f, app, rows[5]);
    draw_input(f, app, rows[7]);
    draw_buttons(f, app, rows[8]);
    draw_message(f, app, rows[9]);
    draw_status(f, app, rows[10]);
}

fn draw_title(f: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta))
        .title(Span::styled(
            " Memory Master ",
            Style::default()
                .fg(Color::LightMagenta)
                .add_modifier(Modifier::BOLD),
        ))
        .title_alignment(Alignment::Center);
    let subtitle = Paragraph::new(Line::from(vec![
        Span::styled("* ", Style::default().fg(Color::Yellow)),
        Span::raw("Test your memory - remember and repeat the sequence"),
        Span::styled(" *", Style::default().fg(Color::Yellow)),
    ]))
    .alignment(Alignment::Center)
    .style(Style::default().fg(Color::Gray))
    .block(block);
    f.render_widget(subtitle, area);
}

fn draw_badges(f: &mut Frame, app: &TuiApp, area: Rect) {
    let line = Line::from(vec![
        Span::styled(
            dashboard::round_badge(app.game.round()),
            Style::default()
                .fg(Color::White)
                .bg(Color::Indexed(61))
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            dashboard::high_score_badge(app.game.high_score()),
            Style::default()
                .fg(Color::Black)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
    ]);
    f.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

fn draw_instructions(f: &mut Frame, app: &TuiApp, area: Rect) {
    let text = Paragraph::new(app.game.instructions())
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD));
    f.render_widget(text, area);
}

fn draw_display(f: &mut Frame, app: &TuiApp, area: Rect) {
    let boxed = centered_width(area, GLYPH_WIDTH + 6);
    let lit = app.displayed_digit.is_some();
    let border = if lit {
        Style::default().fg(Color::LightMagenta).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let block = Block::default().borders(Borders::ALL).border_style(border);

    let lines: Vec<Line> = match app.displayed_digit {
        Some(d) => dashboard::big_digit(d)
            .iter()
            .map(|row| {
                Line::from(Span::styled(
                    *row,
                    Style::default().fg(Color::LightMagenta),
                ))
            })
            .collect(),
        None => Vec::new(),
    };
    let digit = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(block);
    f.render_widget(digit, boxed);
}

fn draw_input(f: &mut Frame, app: &TuiApp, area: Rect) {
    let enabled = app.game.accepts_input();
    let border = if enabled {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let block = Block::default()
        .title(" Guess ")
        .borders(Borders::ALL)
        .border_style(border);
    let inner = block.inner(area);

    let content = if app.input.is_empty() && enabled {
        Line::from(vec![
            Span::styled(PROMPT, Style::default().fg(Color::Cyan)),
            Span::styled(
                "Type the sequence (e.g. 1 2 3)",
                Style::default().fg(Color::DarkGray),
            ),
        ])
    } else {
        Line::from(vec![
            Span::styled(PROMPT, border),
            Span::raw(visible_tail(&app.input, text_width(inner.width))),
        ])
    };
    f.render_widget(Paragraph::new(content).block(block), area);

    if enabled {
        let shown = visible_tail(&app.input, text_width(inner.width))
            .chars()
            .count() as u16;
        let offset = PROMPT.len() as u16 + shown;
        let x = inner.x + offset.min(inner.width.saturating_sub(1));
        f.set_cursor_position(Position::new(x, inner.y));
    }
}

/// Columns left for typed text after the prompt, keeping one for the cursor.
fn text_width(inner_width: u16) -> usize {
    usize::from(inner_width.saturating_sub(PROMPT.len() as u16 + 1))
}

/// The last `width` chars of `text`, so the end being typed stays visible.
fn visible_tail(text: &str, width: usize) -> &str {
    let count = text.chars().count();
    if count <= width {
        return text;
    }
    let skip = count - width;
    match text.char_indices().nth(skip) {
        Some((idx, _)) => &text[idx..],
        None => "",
    }
}

fn draw_buttons(f: &mut Frame, app: &TuiApp, area: Rect) {
    let active = Style::default()
        .fg(Color::Black)
        .bg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let inactive = Style::default().fg(Color::Gray).bg(Color::DarkGray);

    let start_style = if app.game.can_start() {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Green)
            .add_modifier(Modifier::BOLD)
    } else {
        inactive
    };
    let submit_style = if app.game.accepts_input() {
        active
    } else {
        inactive
    };

    let line = Line::from(vec![
        Span::styled(format!(" ^S {} ", app.game.start_label()), start_style),
        Span::raw("  "),
        Span::styled(" Enter Submit ", submit_style),
    ]);
    f.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

fn draw_message(f: &mut Frame, app: &TuiApp, area: Rect) {
    let Some(message) = app.game.message() else {
        return;
    };
    let lines: Vec<Line> = message.lines().map(Line::from).collect();
    let text = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::White))
        .wrap(Wrap { trim: true });
    f.render_widget(text, area);
}

fn draw_status(f: &mut Frame, app: &TuiApp, area: Rect) {
    let mut spans = vec![
        Span::styled(
            format!("[{}]", dashboard::phase_label(app.game.phase())),
            Style::default().fg(Color::Yellow),
        ),
        Span::raw(" ^S/F2:Start  Enter:Submit  Esc:Quit"),
    ];
    if let Some(note) = &app.status_note {
        spans.push(Span::styled(
            format!("  {note}"),
            Style::default().fg(Color::Red),
        ));
    }
    f.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}

/// Horizontally center a column of at most `width` cells.
fn centered_width(area: Rect, width: u16) -> Rect {
    let width = width.min(area.width);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y,
        width,
        height: area.height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameController, RevealEvent, ScriptedDigits};
    use crate::score::MemoryScoreStore;
    use crate::tui::event::TuiMessage;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn app() -> TuiApp {
        let game = GameController::new(Box::new(ScriptedDigits::new([7, 2])), 4);
        TuiApp::new(game, Box::new(MemoryScoreStore::with_score(4)))
    }

    fn render(app: &TuiApp) -> String {
        let backend = TestBackend::new(80, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn idle_screen_invites_start() {
        let screen = render(&app());
        assert!(screen.contains("Memory Master"));
        assert!(screen.contains("Press Start to Begin"));
        assert!(screen.contains("Start Game"));
        assert!(!screen.contains("High Score"));
    }

    #[test]
    fn presenting_screen_shows_badges_and_digit() {
        let mut app = app();
        app.start_game();
        let plan = app.pending_reveal.take().unwrap();
        app.update(TuiMessage::Reveal(RevealEvent::Started(plan.id)));
        app.update(TuiMessage::Reveal(RevealEvent::Show(plan.id, 7)));

        let screen = render(&app);
        assert!(screen.contains("Round 1 - Memorize the sequence!"));
        assert!(screen.contains("High Score: 4"));
        assert!(screen.contains("Restart Game"));
        assert!(screen.contains("█████"));
    }

    #[test]
    fn game_over_message_spans_two_lines() {
        let mut app = app();
        app.start_game();
        let plan = app.pending_reveal.take().unwrap();
        app.update(TuiMessage::Reveal(RevealEvent::Finished(plan.id)));
        app.input = "1".into();
        app.submit();

        let screen = render(&app);
        assert!(screen.contains("Game over! You remembered 0 rounds."));
        assert!(screen.contains("Sequence was: 7"));
        assert!(screen.contains("Press Start to play again."));
    }

    #[test]
    fn tiny_terminal_does_not_panic() {
        let backend = TestBackend::new(10, 5);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw(f, &app())).unwrap();
    }

    #[test]
    fn visible_tail_keeps_the_end() {
        assert_eq!(visible_tail("1 2 3", 10), "1 2 3");
        assert_eq!(visible_tail("1 2 3 4 5", 3), "4 5");
        assert_eq!(visible_tail("abc", 0), "");
    }

    #[test]
    fn long_guess_shows_its_tail() {
        let mut app = app();
        app.start_game();
        let plan = app.pending_reveal.take().unwrap();
        app.update(TuiMessage::Reveal(RevealEvent::Finished(plan.id)));
        // Wider than the 64-column card; ends with a marker.
        app.input = format!("{} 9 8 7", "1 ".repeat(60));

        let backend = TestBackend::new(80, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw(f, &app)).unwrap();
        let screen = render(&app);
        assert!(screen.contains("9 8 7"));

        // Cursor sits just past the visible text, inside the field.
        let card = centered_width(Rect::new(0, 0, 80, 30), CARD_WIDTH);
        let inner_right = card.x + card.width - 2;
        let cursor = terminal.get_cursor_position().unwrap();
        assert_eq!(cursor.x, inner_right);
    }

    #[test]
    fn centered_width_clamps() {
        let area = Rect::new(0, 0, 10, 4);
        assert_eq!(centered_width(area, 20), area);
        assert_eq!(centered_width(area, 4), Rect::new(3, 0, 4, 4));
    }
}
