//! Classification of a board into in-progress or one of the terminal results

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Board, Mark, lines::LineAnalyzer};

/// Result of evaluating a board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    InProgress,
    PlayerWin,
    OpponentWin,
    Draw,
}

impl Outcome {
    pub fn is_terminal(self) -> bool {
        self != Outcome::InProgress
    }

    /// The winning side, if any
    pub fn winner(self) -> Option<Mark> {
        match self {
            Outcome::PlayerWin => Some(Mark::Player),
            Outcome::OpponentWin => Some(Mark::Opponent),
            Outcome::InProgress | Outcome::Draw => None,
        }
    }

    fn win_for(mark: Mark) -> Self {
        match mark {
            Mark::Player => Outcome::PlayerWin,
            Mark::Opponent => Outcome::OpponentWin,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Outcome::InProgress => "in progress",
            Outcome::PlayerWin => "player wins",
            Outcome::OpponentWin => "opponent wins",
            Outcome::Draw => "draw",
        };
        f.write_str(text)
    }
}

/// Evaluate a board.
///
/// A completed line wins; when the board holds more than one, the first in
/// row, column, diagonal scan order decides. A full board without a line is a
/// draw, anything else is still in progress.
pub fn evaluate(board: &Board) -> Outcome {
    if let Some((mark, _)) = LineAnalyzer::first_complete_line(board.cells()) {
        Outcome::win_for(mark)
    } else if board.is_full() {
        Outcome::Draw
    } else {
        Outcome::InProgress
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(s: &str) -> Board {
        Board::from_string(s).unwrap()
    }

    #[test]
    fn test_player_wins_top_row() {
        assert_eq!(evaluate(&board("XXXOO....")), Outcome::PlayerWin);
        assert_eq!(evaluate(&board("XXXOO.O..")), Outcome::PlayerWin);
    }

    #[test]
    fn test_opponent_wins_column() {
        assert_eq!(evaluate(&board("OXXOX.O..")), Outcome::OpponentWin);
    }

    #[test]
    fn test_diagonal_win() {
        assert_eq!(evaluate(&board("XO.OX...X")), Outcome::PlayerWin);
    }

    #[test]
    fn test_draw_on_full_board() {
        assert_eq!(evaluate(&board("XOXXOOOXX")), Outcome::Draw);
    }

    #[test]
    fn test_in_progress() {
        assert_eq!(evaluate(&Board::new()), Outcome::InProgress);
        assert_eq!(evaluate(&board("XO..X....")), Outcome::InProgress);
    }

    #[test]
    fn test_win_on_full_board_is_not_a_draw() {
        assert_eq!(evaluate(&board("XXXOOXXOO")), Outcome::PlayerWin);
    }

    #[test]
    fn test_both_sides_winning_resolves_by_scan_order() {
        // Unreachable in real play: row 0 belongs to the opponent, row 2 to the player.
        assert_eq!(evaluate(&board("OOO...XXX")), Outcome::OpponentWin);
        assert_eq!(evaluate(&board("XXX...OOO")), Outcome::PlayerWin);
        // Left column before right column
        assert_eq!(evaluate(&board("O.XO.XOXX")), Outcome::OpponentWin);
        assert_eq!(evaluate(&board("OOOXXX...")), Outcome::OpponentWin);
    }

    #[test]
    fn test_evaluate_is_idempotent() {
        let b = board("XO.XO....");
        assert_eq!(evaluate(&b), evaluate(&b));
    }

    #[test]
    fn test_legal_moves_is_idempotent() {
        let b = board("XO.XO....");
        let first = b.legal_moves();
        assert_eq!(first, vec![2, 5, 6, 7, 8]);
        assert_eq!(b.legal_moves(), first);
        assert_eq!(b.encode(), "XO.XO....");
    }

    #[test]
    fn test_winner() {
        assert_eq!(Outcome::PlayerWin.winner(), Some(Mark::Player));
        assert_eq!(Outcome::OpponentWin.winner(), Some(Mark::Opponent));
        assert_eq!(Outcome::Draw.winner(), None);
        assert!(!Outcome::InProgress.is_terminal());
        assert!(Outcome::Draw.is_terminal());
    }
}
