//! Memory Master — a sequence memory game for the terminal.
//!
//! Digits flash one at a time; type them back in order. Each correct answer
//! adds one more digit. The best round reached is kept between sessions.

pub mod config;
pub mod game;
pub mod score;
pub mod tui;
