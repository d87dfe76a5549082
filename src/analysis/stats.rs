//! Statistical summary of the move log

use serde::{Deserialize, Serialize};

use crate::{
    corpus::MoveRecord,
    tictactoe::{CELL_COUNT, Mark, Outcome, evaluate},
};

/// Distribution of finished games
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeDistribution {
    pub player_wins: usize,
    pub opponent_wins: usize,
    pub draws: usize,
}

impl OutcomeDistribution {
    pub fn total(&self) -> usize {
        self.player_wins + self.opponent_wins + self.draws
    }

    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::PlayerWin => self.player_wins += 1,
            Outcome::OpponentWin => self.opponent_wins += 1,
            Outcome::Draw => self.draws += 1,
            Outcome::InProgress => {}
        }
    }
}

/// What the corpus holds.
///
/// Games are not delimited in the log; a record on an empty board starts one
/// and a record whose move ends the game finishes it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CorpusStats {
    pub records: usize,
    pub games_started: usize,
    pub player_moves: usize,
    pub opponent_moves: usize,
    /// How often each cell was chosen
    pub cell_histogram: [usize; CELL_COUNT],
    /// How often each cell was chosen as the opening move
    pub opening_histogram: [usize; CELL_COUNT],
    pub outcomes: OutcomeDistribution,
    /// Mean moves per finished game
    pub average_game_length: f64,
}

impl CorpusStats {
    pub fn from_records(records: &[MoveRecord]) -> Self {
        let mut stats = CorpusStats {
            records: records.len(),
            ..CorpusStats::default()
        };
        let mut finished_moves = 0usize;

        for record in records {
            match record.mover() {
                Mark::Player => stats.player_moves += 1,
                Mark::Opponent => stats.opponent_moves += 1,
            }
            stats.cell_histogram[record.cell()] += 1;

            if record.board().occupied_count() == 0 {
                stats.games_started += 1;
                stats.opening_histogram[record.cell()] += 1;
            }

            let outcome = evaluate(&record.board_after());
            if outcome.is_terminal() {
                stats.outcomes.record(outcome);
                finished_moves += record.board_after().occupied_count();
            }
        }

        let finished = stats.outcomes.total();
        if finished > 0 {
            stats.average_game_length = finished_moves as f64 / finished as f64;
        }
        stats
    }

    /// Most chosen cell overall, lowest index on ties
    pub fn favourite_cell(&self) -> Option<usize> {
        favourite(&self.cell_histogram)
    }

    /// Most chosen opening cell, lowest index on ties
    pub fn favourite_opening(&self) -> Option<usize> {
        favourite(&self.opening_histogram)
    }
}

fn favourite(histogram: &[usize; CELL_COUNT]) -> Option<usize> {
    let (cell, &count) = histogram
        .iter()
        .enumerate()
        .rev()
        .max_by_key(|&(_, count)| count)?;
    (count > 0).then_some(cell)
}
