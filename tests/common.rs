//! Common test utilities for the triki test suite.

#![allow(dead_code)]

use std::collections::VecDeque;

use triki::{
    Error, Result, TurnReport,
    corpus::MoveRecord,
    ports::{Actor, CellScorer, MovePredictor},
    tictactoe::{Board, CELL_COUNT, Outcome},
};

/// Actor that plays a fixed list of cells and then quits.
#[derive(Debug, Default)]
pub struct ScriptedActor {
    moves: VecDeque<usize>,
    pub rejections: usize,
    pub turns: Vec<TurnReport>,
    pub outcome: Option<Outcome>,
}

impl ScriptedActor {
    pub fn new(moves: &[usize]) -> Self {
        Self {
            moves: moves.iter().copied().collect(),
            ..Self::default()
        }
    }
}

impl Actor for ScriptedActor {
    fn request_move(&mut self, _board: &Board) -> Result<Option<usize>> {
        Ok(self.moves.pop_front())
    }

    fn on_rejected(&mut self, _board: &Board, _error: &Error) -> Result<()> {
        self.rejections += 1;
        Ok(())
    }

    fn on_turn(&mut self, report: &TurnReport) -> Result<()> {
        self.turns.push(report.clone());
        Ok(())
    }

    fn on_game_end(&mut self, _board: &Board, outcome: Outcome) -> Result<()> {
        self.outcome = Some(outcome);
        Ok(())
    }
}

/// Scorer returning the same scores for every board.
pub struct FixedScorer(pub [f32; CELL_COUNT]);

impl CellScorer for FixedScorer {
    fn score(&self, _features: &[f32; CELL_COUNT]) -> [f32; CELL_COUNT] {
        self.0
    }
}

/// Predictor that always answers the same cell, legal or not.
pub struct StubbornPredictor(pub usize);

impl MovePredictor for StubbornPredictor {
    fn select_move(&mut self, _board: &Board, _legal_moves: &[usize]) -> Result<usize> {
        Ok(self.0)
    }

    fn name(&self) -> &str {
        "stubborn"
    }
}

/// Records of a game played from the empty board, sides alternating.
pub fn records_for_game(moves: &[usize]) -> Vec<MoveRecord> {
    let mut board = Board::new();
    moves
        .iter()
        .map(|&cell| {
            let record = MoveRecord::new(board, cell, board.next_mark()).expect("legal move");
            board = record.board_after();
            record
        })
        .collect()
}
