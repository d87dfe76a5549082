//! Error types for the triki crate

use std::{fmt, path::PathBuf};

use thiserror::Error;

use crate::tictactoe::{Mark, Outcome};

/// Why a cell cannot receive a mark
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IllegalMoveReason {
    OutOfRange,
    Occupied,
}

impl fmt::Display for IllegalMoveReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IllegalMoveReason::OutOfRange => write!(f, "cell is out of range (must be 0-8)"),
            IllegalMoveReason::Occupied => write!(f, "cell is already occupied"),
        }
    }
}

/// Main error type for the triki crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("illegal move at cell {position}: {reason}")]
    IllegalMove {
        position: usize,
        reason: IllegalMoveReason,
    },

    #[error("it is not {attempted}'s turn ({expected} to move)")]
    OutOfTurn { expected: Mark, attempted: Mark },

    #[error("game already over ({outcome}); reset to play again")]
    GameOver { outcome: Outcome },

    #[error("no legal moves available")]
    NoValidMoves,

    #[error("move log is empty: cannot train yet")]
    EmptyCorpus,

    #[error("predictor '{predictor}' chose cell {position}, which is not a legal move")]
    PredictorContractViolation { predictor: String, position: usize },

    #[error("no saved model at {path:?}")]
    NoSavedModel { path: PathBuf },

    #[error("invalid move record on line {line}: {reason}")]
    InvalidRecord { line: usize, reason: String },

    #[error("invalid cell value {value} (expected -1, 0 or 1)")]
    InvalidCellValue { value: i64 },

    #[error("invalid mover value {value} (expected 1 or -1)")]
    InvalidMoverValue { value: i64 },

    #[error("board string too short: expected {expected} cells, got {got} in '{context}'")]
    InvalidBoardLength {
        expected: usize,
        got: usize,
        context: String,
    },

    #[error("invalid character '{character}' at position {position} in '{context}'")]
    InvalidCellCharacter {
        character: char,
        position: usize,
        context: String,
    },

    #[error(
        "invalid piece counts: player={player_count}, opponent={opponent_count} (must be equal or player ahead by 1)"
    )]
    InvalidPieceCounts {
        player_count: usize,
        opponent_count: usize,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("failed to {operation}: {message}")]
    SerializationContext { operation: String, message: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },
}

impl Error {
    /// Errors caused by a bad request from the moving side.
    ///
    /// The session state is unchanged and the same actor may simply try again.
    pub fn is_rejected_move(&self) -> bool {
        matches!(self, Error::IllegalMove { .. } | Error::OutOfTurn { .. })
    }
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
