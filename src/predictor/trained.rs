//! Predictor backed by a numeric cell scorer

use crate::{
    Error, Result,
    ports::{CellScorer, MovePredictor},
    tictactoe::{Board, encoding::encode_features},
};

/// Masked argmax over a scorer's output.
///
/// Only legal cells compete. Ties go to the lowest index and a NaN score never
/// beats a finite one; if every legal score is NaN the lowest legal cell is
/// played.
#[derive(Debug, Clone)]
pub struct TrainedPredictor<S: CellScorer> {
    scorer: S,
}

impl<S: CellScorer> TrainedPredictor<S> {
    pub fn new(scorer: S) -> Self {
        Self { scorer }
    }
}

impl<S: CellScorer> MovePredictor for TrainedPredictor<S> {
    fn select_move(&mut self, board: &Board, legal_moves: &[usize]) -> Result<usize> {
        let lowest = legal_moves.iter().copied().min().ok_or(Error::NoValidMoves)?;
        let scores = self.scorer.score(&encode_features(board));

        let mut best: Option<(usize, f32)> = None;
        for &cell in legal_moves {
            let Some(&score) = scores.get(cell) else {
                continue;
            };
            if score.is_nan() {
                continue;
            }
            match best {
                Some((best_cell, best_score))
                    if best_score > score || (best_score == score && best_cell < cell) => {}
                _ => best = Some((cell, score)),
            }
        }

        Ok(best.map_or(lowest, |(cell, _)| cell))
    }

    fn name(&self) -> &str {
        "trained"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tictactoe::CELL_COUNT;

    struct FixedScorer([f32; CELL_COUNT]);

    impl CellScorer for FixedScorer {
        fn score(&self, _features: &[f32; CELL_COUNT]) -> [f32; CELL_COUNT] {
            self.0
        }
    }

    #[test]
    fn test_best_legal_cell_wins() {
        // Cell 4 scores highest but is taken
        let scores = [0.1, 0.0, 0.3, 0.0, 0.9, 0.0, 0.0, 0.2, 0.0];
        let mut predictor = TrainedPredictor::new(FixedScorer(scores));
        let board = Board::from_string("....X....").unwrap();
        assert_eq!(
            predictor
                .select_move(&board, &board.legal_moves())
                .unwrap(),
            2
        );
    }

    #[test]
    fn test_ties_go_to_lowest_index() {
        let scores = [0.0, 0.0, 0.0, 0.0, 0.0, 0.5, 0.0, 0.5, 0.0];
        let mut predictor = TrainedPredictor::new(FixedScorer(scores));
        assert_eq!(
            predictor.select_move(&Board::new(), &[7, 5, 1]).unwrap(),
            5
        );
    }

    #[test]
    fn test_nan_never_wins() {
        let mut scores = [f32::NAN; CELL_COUNT];
        scores[6] = -3.0;
        let mut predictor = TrainedPredictor::new(FixedScorer(scores));
        assert_eq!(
            predictor
                .select_move(&Board::new(), &Board::new().legal_moves())
                .unwrap(),
            6
        );

        let mut all_nan = TrainedPredictor::new(FixedScorer([f32::NAN; CELL_COUNT]));
        assert_eq!(all_nan.select_move(&Board::new(), &[8, 2]).unwrap(), 2);
    }

    #[test]
    fn test_no_moves() {
        let mut predictor = TrainedPredictor::new(FixedScorer([0.0; CELL_COUNT]));
        assert!(matches!(
            predictor.select_move(&Board::new(), &[]),
            Err(Error::NoValidMoves)
        ));
    }
}
