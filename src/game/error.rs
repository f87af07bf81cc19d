//! Game-specific error types.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("Please enter {expected} valid numbers separated by spaces.")]
    MalformedGuess { expected: usize },

    #[error("not accepting input right now")]
    NotAcceptingInput,

    #[error("the sequence is still being revealed")]
    RevealInProgress,
}

pub type GameResult<T> = Result<T, GameError>;
