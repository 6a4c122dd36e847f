//! Error types
//!
//! Structural errors block the operation that raised them and leave state
//! untouched. Consistency and coverage findings are not errors; they are
//! reported through [`crate::validation::GameValidation`].

use crate::roster::PlayerId;
use crate::schedule::GameNumber;

/// Roster structure violations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RosterError {
    #[error("Jersey number {0} is already on the roster")]
    DuplicateJersey(u32),

    #[error("Player #{jersey} is missing a {field}")]
    MissingValue { jersey: u32, field: &'static str },

    #[error("Unknown player: {0}")]
    UnknownPlayer(PlayerId),
}

/// Schedule structure violations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScheduleError {
    #[error("Game {0} is already on the schedule")]
    DuplicateGame(GameNumber),

    #[error("Game {game}: innings must be between 1 and {max}, got {innings}")]
    InvalidInnings { game: GameNumber, innings: u32, max: u32 },

    #[error("Unknown game: {0}")]
    UnknownGame(GameNumber),

    #[error("Game {game}: inning {inning} is outside 1..={innings}")]
    InningOutOfRange { game: GameNumber, inning: u32, innings: u32 },

    #[error("Cannot schedule {0} games")]
    TooManyGames(usize),
}

/// Failures while reading roster CSV or team bundles
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("Roster must contain columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("Roster contains missing values (row {row}, column {column})")]
    MissingValues { row: usize, column: String },

    #[error("Row {row}: invalid jersey number '{value}'")]
    InvalidJersey { row: usize, value: String },

    #[error("Jersey numbers must be unique (duplicate {0})")]
    DuplicateJersey(u32),

    #[error("Malformed team data: {0}")]
    Malformed(String),

    #[error(transparent)]
    Roster(#[from] RosterError),

    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    #[error(transparent)]
    Position(#[from] UnknownPosition),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A position label outside the fielding vocabulary
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown position '{0}'")]
pub struct UnknownPosition(pub String);

/// Any error raised by a [`crate::Team`] operation
#[derive(Debug, thiserror::Error)]
pub enum LineupError {
    #[error(transparent)]
    Roster(#[from] RosterError),

    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    #[error(transparent)]
    Import(#[from] ImportError),
}
