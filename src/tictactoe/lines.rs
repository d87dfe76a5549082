//! Winning line analysis for Tic-Tac-Toe

use super::{Cell, Mark, board::CELL_COUNT};

/// Winning line indices on the 3x3 board, in scan order
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // columns
    [0, 4, 8],
    [2, 4, 6], // diagonals
];

/// Utility for analyzing winning lines in Tic-Tac-Toe
pub struct LineAnalyzer;

impl LineAnalyzer {
    /// First fully occupied line in [`WINNING_LINES`] order and the mark on it.
    ///
    /// Rows are scanned before columns, columns before diagonals, so a board
    /// where both sides somehow hold a line always resolves the same way.
    pub fn first_complete_line(cells: &[Cell; CELL_COUNT]) -> Option<(Mark, [usize; 3])> {
        WINNING_LINES.iter().find_map(|&line| {
            let mark = cells[line[0]].mark()?;
            line.iter()
                .all(|&idx| cells[idx] == mark.to_cell())
                .then_some((mark, line))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_row() {
        let mut cells = [Cell::Empty; 9];
        cells[0] = Cell::Player;
        cells[1] = Cell::Player;
        cells[2] = Cell::Player;

        assert_eq!(
            LineAnalyzer::first_complete_line(&cells),
            Some((Mark::Player, [0, 1, 2]))
        );
    }

    #[test]
    fn test_complete_column() {
        let mut cells = [Cell::Empty; 9];
        cells[0] = Cell::Opponent;
        cells[3] = Cell::Opponent;
        cells[6] = Cell::Opponent;

        assert_eq!(
            LineAnalyzer::first_complete_line(&cells),
            Some((Mark::Opponent, [0, 3, 6]))
        );
    }

    #[test]
    fn test_complete_diagonal() {
        let mut cells = [Cell::Empty; 9];
        cells[2] = Cell::Player;
        cells[4] = Cell::Player;
        cells[6] = Cell::Player;

        assert_eq!(
            LineAnalyzer::first_complete_line(&cells),
            Some((Mark::Player, [2, 4, 6]))
        );
    }

    #[test]
    fn test_first_complete_line_scans_top_to_bottom() {
        // Both sides hold a row: the upper row is reported.
        let mut cells = [Cell::Empty; 9];
        for idx in [0, 1, 2] {
            cells[idx] = Cell::Opponent;
        }
        for idx in [6, 7, 8] {
            cells[idx] = Cell::Player;
        }
        assert_eq!(
            LineAnalyzer::first_complete_line(&cells),
            Some((Mark::Opponent, [0, 1, 2]))
        );
    }

    #[test]
    fn test_first_complete_line_columns_left_to_right() {
        let mut cells = [Cell::Empty; 9];
        for idx in [1, 4, 7] {
            cells[idx] = Cell::Player;
        }
        for idx in [2, 5, 8] {
            cells[idx] = Cell::Opponent;
        }
        assert_eq!(
            LineAnalyzer::first_complete_line(&cells),
            Some((Mark::Player, [1, 4, 7]))
        );
    }

    #[test]
    fn test_no_line_on_empty_board() {
        let cells = [Cell::Empty; 9];
        assert_eq!(LineAnalyzer::first_complete_line(&cells), None);
    }
}
