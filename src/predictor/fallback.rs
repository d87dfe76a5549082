//! Predictor used when no trained state exists

use crate::{Error, Result, ports::MovePredictor, tictactoe::Board};

/// Always plays the lowest-index legal cell.
///
/// Deterministic, so games against an untrained opponent are reproducible.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackPredictor;

impl FallbackPredictor {
    pub fn new() -> Self {
        Self
    }
}

impl MovePredictor for FallbackPredictor {
    fn select_move(&mut self, _board: &Board, legal_moves: &[usize]) -> Result<usize> {
        legal_moves.iter().copied().min().ok_or(Error::NoValidMoves)
    }

    fn name(&self) -> &str {
        "fallback"
    }
}
