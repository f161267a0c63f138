//! Failures raised while registering, parsing and solving puzzles

use thiserror::Error;

/// The puzzle input could not be turned into a day's shared data
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    /// Input had no non-blank line at all
    #[error("puzzle input is empty")]
    EmptyInput,
    /// A line or block does not follow the day's format
    #[error("malformed input: {0}")]
    InvalidFormat(String),
    /// A section the day needs never appears
    #[error("incomplete input: {0}")]
    MissingData(String),
}

/// A part could not produce an answer
#[derive(Debug, Error)]
pub enum SolveError {
    /// Within `1..=PARTS` but no `PartSolver` handles it
    #[error("part {0} has no solver")]
    PartNotImplemented(u8),
    #[error("part {0} does not exist for this day")]
    PartOutOfRange(u8),
    /// The input admits no answer (search exhausted, inconsistent data)
    #[error("no answer: {0}")]
    SolveFailed(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Looking up or instantiating a day failed
#[derive(Debug, Error)]
pub enum SolverError {
    #[error("no solver registered for {0}/{1:02}")]
    NotFound(u16, u8),
    #[error("{0}/{1:02} is outside the supported events")]
    InvalidYearDay(u16, u8),
    #[error(transparent)]
    ParseError(#[from] ParseError),
    #[error(transparent)]
    SolveError(#[from] SolveError),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("{0}/{1:02} is registered twice")]
    DuplicateSolver(u16, u8),
    #[error("cannot register {0}/{1:02}: outside the supported events")]
    InvalidYearDay(u16, u8),
}
