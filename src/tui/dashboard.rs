//! Dashboard utilities — badge text, status bar, and large digit glyphs.

use crate::game::Phase;

/// Height of a large digit glyph, in rows.
pub const GLYPH_HEIGHT: u16 = 5;
/// Width of a large digit glyph, in columns.
pub const GLYPH_WIDTH: u16 = 5;

const GLYPHS: [[&str; 5]; 10] = [
    ["█████", "█   █", "█   █", "█   █", "█████"],
    ["  █  ", " ██  ", "  █  ", "  █  ", " ███ "],
    ["█████", "    █", "█████", "█    ", "█████"],
    ["█████", "    █", " ████", "    █", "█████"],
    ["█   █", "█   █", "█████", "    █", "    █"],
    ["█████", "█    ", "█████", "    █", "█████"],
    ["█████", "█    ", "█████", "█   █", "█████"],
    ["█████", "    █", "   █ ", "  █  ", "  █  "],
    ["█████", "█   █", "█████", "█   █", "█████"],
    ["█████", "█   █", "█████", "    █", "█████"],
];

/// Five-row block rendering of a single digit. Values above 9 render as 9.
pub fn big_digit(digit: u8) -> [&'static str; 5] {
    GLYPHS[usize::from(digit.min(9))]
}

/// "Round N" badge.
pub fn round_badge(round: u32) -> String {
    format!(" Round {round} ")
}

/// "High Score: N" badge.
pub fn high_score_badge(score: u32) -> String {
    format!(" High Score: {score} ")
}

/// Short phase label for the status bar.
pub fn phase_label(phase: Phase) -> &'static str {
    match phase {
        Phase::Idle => "idle",
        Phase::Presenting => "watch",
        Phase::AwaitingInput => "your turn",
    }
}
