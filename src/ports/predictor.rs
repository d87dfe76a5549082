//! Move predictor port - how the automated side picks a cell

use crate::{
    Result,
    tictactoe::{Board, CELL_COUNT},
};

/// Chooses the opponent's move.
///
/// The returned index must be one of `legal_moves`. Callers do not trust
/// this: [`crate::predictor::select_checked`] turns a bad answer into a logged
/// contract violation and a safe substitute move.
pub trait MovePredictor: Send {
    /// Pick a cell for `board` among `legal_moves`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NoValidMoves`] when `legal_moves` is empty.
    fn select_move(&mut self, board: &Board, legal_moves: &[usize]) -> Result<usize>;

    /// Name used in logs and reports
    fn name(&self) -> &str;
}

/// Numeric scoring collaborator: nine board features in, one score per cell out.
///
/// Scorers know nothing about legality; masking happens in the predictor.
pub trait CellScorer: Send + Sync {
    fn score(&self, features: &[f32; CELL_COUNT]) -> [f32; CELL_COUNT];
}
