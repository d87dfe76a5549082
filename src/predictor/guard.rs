//! Enforcement of the predictor contract
//!
//! A predictor must answer with one of the legal cells it was offered. A bad
//! answer is a programming error in the predictor, not a reason to end a game:
//! it is logged and replaced by the lowest legal cell.

use tracing::warn;

use crate::{Error, Result, ports::MovePredictor, tictactoe::Board};

/// A predictor's answer after the legality check
#[derive(Debug)]
pub struct CheckedSelection {
    /// The cell to play (always legal)
    pub cell: usize,
    /// Set when the predictor's own answer was rejected
    pub violation: Option<Error>,
}

impl CheckedSelection {
    pub fn is_substitute(&self) -> bool {
        self.violation.is_some()
    }
}

/// Ask `predictor` for a move on `board` and make sure it is legal.
///
/// # Errors
///
/// Returns [`Error::NoValidMoves`] on a full board and passes through any
/// error the predictor itself raises.
pub fn select_checked(predictor: &mut dyn MovePredictor, board: &Board) -> Result<CheckedSelection> {
    let legal_moves = board.legal_moves();
    let Some(&lowest) = legal_moves.first() else {
        return Err(Error::NoValidMoves);
    };

    let cell = predictor.select_move(board, &legal_moves)?;
    if legal_moves.contains(&cell) {
        return Ok(CheckedSelection {
            cell,
            violation: None,
        });
    }

    let violation = Error::PredictorContractViolation {
        predictor: predictor.name().to_string(),
        position: cell,
    };
    warn!(
        predictor = predictor.name(),
        chosen = cell,
        substitute = lowest,
        board = %board.encode(),
        "{violation}"
    );
    Ok(CheckedSelection {
        cell: lowest,
        violation: Some(violation),
    })
}
