//! Digit sequences, digit generation, and guess parsing.

use std::collections::VecDeque;
use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::error::GameError;

/// Smallest digit a sequence may contain.
pub const MIN_DIGIT: u8 = 1;
/// Largest digit a sequence may contain.
pub const MAX_DIGIT: u8 = 9;

/// Source of sequence digits. Every draw must land in `MIN_DIGIT..=MAX_DIGIT`.
pub trait DigitSource: Send {
    fn next_digit(&mut self) -> u8;
}

/// Uniform, independent draws from 1..=9. Repeats are allowed.
pub struct RandomDigits {
    rng: StdRng,
}

impl RandomDigits {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Deterministic source, for reproducible games (`--seed`).
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomDigits {
    fn default() -> Self {
        Self::new()
    }
}

impl DigitSource for RandomDigits {
    fn next_digit(&mut self) -> u8 {
        self.rng.random_range(MIN_DIGIT..=MAX_DIGIT)
    }
}

/// Replays a fixed list of digits, then falls back to 1.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDigits {
    queue: VecDeque<u8>,
}

impl ScriptedDigits {
    pub fn new(digits: impl IntoIterator<Item = u8>) -> Self {
        Self {
            queue: digits
                .into_iter()
                .map(|d| d.clamp(MIN_DIGIT, MAX_DIGIT))
                .collect(),
        }
    }
}

impl DigitSource for ScriptedDigits {
    fn next_digit(&mut self) -> u8 {
        self.queue.pop_front().unwrap_or(MIN_DIGIT)
    }
}

/// The ordered digits shown to the player.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sequence(Vec<u8>);

impl Sequence {
    /// A fresh one-digit sequence.
    pub fn first(source: &mut dyn DigitSource) -> Self {
        Self(vec![source.next_digit()])
    }

    /// Append exactly one new digit.
    pub fn extend(&mut self, source: &mut dyn DigitSource) {
        self.0.push(source.next_digit());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn digits(&self) -> &[u8] {
        &self.0
    }

    /// Element-for-element, order-sensitive comparison against a parsed guess.
    pub fn matches(&self, guess: &[i64]) -> bool {
        guess.len() == self.0.len()
            && self
                .0
                .iter()
                .zip(guess)
                .all(|(&d, &g)| i64::from(d) == g)
    }
}

impl From<Vec<u8>> for Sequence {
    fn from(digits: Vec<u8>) -> Self {
        Self(digits)
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, d) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{d}")?;
        }
        Ok(())
    }
}

/// Parse a whitespace-separated guess into exactly `expected` integers.
///
/// Out-of-range values (0, 10, -3) parse fine and simply fail to match;
/// only a wrong token count or a non-integer token is malformed.
pub fn parse_guess(text: &str, expected: usize) -> Result<Vec<i64>, GameError> {
    let parsed: Result<Vec<i64>, _> = text.split_whitespace().map(str::parse).collect();
    match parsed {
        Ok(values) if values.len() == expected => Ok(values),
        _ => Err(GameError::MalformedGuess { expected }),
    }
}
