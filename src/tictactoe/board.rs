//! Board state representation and basic operations

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::IllegalMoveReason;

/// Number of cells on the board
pub const CELL_COUNT: usize = 9;

/// A cell on the Tic-Tac-Toe board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    Player,
    Opponent,
}

impl Cell {
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Player => 'X',
            Cell::Opponent => 'O',
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '.' | ' ' | '_' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::Player),
            'O' | 'o' => Some(Cell::Opponent),
            _ => None,
        }
    }

    /// The mark occupying this cell, if any
    pub fn mark(self) -> Option<Mark> {
        match self {
            Cell::Player => Some(Mark::Player),
            Cell::Opponent => Some(Mark::Opponent),
            Cell::Empty => None,
        }
    }
}

/// The side making a move: the external actor (`Player`, always first) or the
/// automated `Opponent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    Player,
    Opponent,
}

impl Mark {
    /// Get the other side
    pub fn other(self) -> Mark {
        match self {
            Mark::Player => Mark::Opponent,
            Mark::Opponent => Mark::Player,
        }
    }

    /// Convert mark to cell
    pub fn to_cell(self) -> Cell {
        match self {
            Mark::Player => Cell::Player,
            Mark::Opponent => Cell::Opponent,
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mark::Player => write!(f, "player"),
            Mark::Opponent => write!(f, "opponent"),
        }
    }
}

/// The nine cells of a game, indexed row-major from the top-left corner.
///
/// `Board` is a small `Copy` value: [`Board::apply_move`] hands back a new
/// board and leaves the receiver untouched, so a snapshot stored in a move
/// record can never be changed by later play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    cells: [Cell; CELL_COUNT],
}

impl Board {
    /// Create an empty board
    pub fn new() -> Self {
        Board {
            cells: [Cell::Empty; CELL_COUNT],
        }
    }

    /// Build a board from raw cells.
    ///
    /// No turn-order check is made here; use [`Board::validate`] when the board
    /// comes from an untrusted source.
    pub fn from_cells(cells: [Cell; CELL_COUNT]) -> Self {
        Board { cells }
    }

    /// Create a board from a string such as `"XX.OO...."`.
    ///
    /// Whitespace and `|` separators are ignored, so `"X|X|. / O|O|."` style
    /// layouts parse as well.
    ///
    /// # Errors
    ///
    /// Returns error if fewer than 9 cells are present or a character is not
    /// one of `X`, `O`, `.`, `_`.
    pub fn from_string(s: &str) -> Result<Self, crate::Error> {
        let chars: Vec<char> = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '|' && *c != '/')
            .collect();
        if chars.len() < CELL_COUNT {
            return Err(crate::Error::InvalidBoardLength {
                expected: CELL_COUNT,
                got: chars.len(),
                context: s.to_string(),
            });
        }

        let mut cells = [Cell::Empty; CELL_COUNT];
        for (i, &c) in chars.iter().take(CELL_COUNT).enumerate() {
            cells[i] = Cell::from_char(c).ok_or_else(|| crate::Error::InvalidCellCharacter {
                character: c,
                position: i,
                context: s.to_string(),
            })?;
        }

        Ok(Board { cells })
    }

    /// Read-only view of the cells
    pub fn cells(&self) -> &[Cell; CELL_COUNT] {
        &self.cells
    }

    /// Get the cell at `pos`, or `None` if `pos` is off the board
    pub fn get(&self, pos: usize) -> Option<Cell> {
        self.cells.get(pos).copied()
    }

    /// Check if a position is on the board and empty
    pub fn is_empty(&self, pos: usize) -> bool {
        self.get(pos) == Some(Cell::Empty)
    }

    /// All indices whose cell is empty, in ascending order.
    ///
    /// Terminal boards are not special-cased: deciding whether play may go on
    /// is the job of [`crate::tictactoe::evaluate`].
    pub fn legal_moves(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell == Cell::Empty)
            .map(|(i, _)| i)
            .collect()
    }

    /// True when no empty cell remains
    pub fn is_full(&self) -> bool {
        !self.cells.contains(&Cell::Empty)
    }

    /// Number of cells holding `mark`
    pub fn count(&self, mark: Mark) -> usize {
        let target = mark.to_cell();
        self.cells.iter().filter(|&&c| c == target).count()
    }

    /// Count the number of occupied cells on the board
    pub fn occupied_count(&self) -> usize {
        self.count(Mark::Player) + self.count(Mark::Opponent)
    }

    /// The side due to move, inferred from the piece counts (player opens)
    pub fn next_mark(&self) -> Mark {
        if self.count(Mark::Player) > self.count(Mark::Opponent) {
            Mark::Opponent
        } else {
            Mark::Player
        }
    }

    /// Place `mark` on `cell` and return the resulting board.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::IllegalMove`] when `cell` is outside 0-8 or
    /// already occupied.
    #[must_use = "apply_move returns a new board; the original is unchanged"]
    pub fn apply_move(&self, cell: usize, mark: Mark) -> Result<Board, crate::Error> {
        match self.get(cell) {
            None => Err(crate::Error::IllegalMove {
                position: cell,
                reason: IllegalMoveReason::OutOfRange,
            }),
            Some(Cell::Empty) => {
                let mut next = *self;
                next.cells[cell] = mark.to_cell();
                Ok(next)
            }
            Some(_) => Err(crate::Error::IllegalMove {
                position: cell,
                reason: IllegalMoveReason::Occupied,
            }),
        }
    }

    /// Check the alternation invariant: the player has as many marks as the
    /// opponent, or exactly one more.
    pub fn validate(&self) -> Result<(), crate::Error> {
        let player_count = self.count(Mark::Player);
        let opponent_count = self.count(Mark::Opponent);
        if player_count == opponent_count || player_count == opponent_count + 1 {
            Ok(())
        } else {
            Err(crate::Error::InvalidPieceCounts {
                player_count,
                opponent_count,
            })
        }
    }

    /// Compact single-line form, e.g. `"X...O...."`
    pub fn encode(&self) -> String {
        self.cells.iter().map(|&c| c.to_char()).collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, &cell) in self.cells.iter().enumerate() {
            write!(f, "{}", cell.to_char())?;
            if (i + 1).is_multiple_of(3) && i < 8 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_new_board() {
        let board = Board::new();
        assert!(board.cells().iter().all(|&c| c == Cell::Empty));
        assert_eq!(board.next_mark(), Mark::Player);
        assert_eq!(board.legal_moves(), (0..9).collect::<Vec<_>>());
    }

    #[test]
    fn test_apply_move() {
        let board = Board::new();

        let next = board.apply_move(4, Mark::Player).unwrap();
        assert_eq!(next.get(4), Some(Cell::Player));
        assert_eq!(next.next_mark(), Mark::Opponent);
        // Receiver untouched
        assert_eq!(board.get(4), Some(Cell::Empty));

        let err = next.apply_move(4, Mark::Opponent).unwrap_err();
        assert!(err.to_string().contains("occupied"));
        assert!(matches!(
            err,
            Error::IllegalMove {
                position: 4,
                reason: IllegalMoveReason::Occupied
            }
        ));
    }

    #[test]
    fn test_apply_move_out_of_range() {
        let err = Board::new().apply_move(9, Mark::Player).unwrap_err();
        assert!(matches!(
            err,
            Error::IllegalMove {
                position: 9,
                reason: IllegalMoveReason::OutOfRange
            }
        ));
    }

    #[test]
    fn test_legal_moves() {
        let mut board = Board::new();
        assert_eq!(board.legal_moves().len(), 9);

        board = board.apply_move(0, Mark::Player).unwrap();
        assert_eq!(board.legal_moves().len(), 8);
        assert!(!board.legal_moves().contains(&0));

        board = board.apply_move(4, Mark::Opponent).unwrap();
        assert_eq!(board.legal_moves().len(), 7);
        assert!(!board.legal_moves().contains(&4));
    }

    #[test]
    fn test_legal_moves_still_listed_on_won_board() {
        let board = Board::from_string("XXXOO....").unwrap();
        assert_eq!(board.legal_moves(), vec![5, 6, 7, 8]);
    }

    #[test]
    fn test_is_full() {
        assert!(!Board::new().is_full());
        assert!(Board::from_string("XOXXOOOXX").unwrap().is_full());
    }

    #[test]
    fn test_from_string() {
        let board = Board::from_string("XOX......").unwrap();
        assert_eq!(board.get(0), Some(Cell::Player));
        assert_eq!(board.get(1), Some(Cell::Opponent));
        assert_eq!(board.get(2), Some(Cell::Player));
        assert_eq!(board.next_mark(), Mark::Opponent);

        assert!(Board::from_string("XO").is_err());
        assert!(Board::from_string("XOZ......").is_err());
    }

    #[test]
    fn test_from_string_with_separators() {
        let board = Board::from_string("X|.|. / .|O|. / .|.|.").unwrap();
        assert_eq!(board.encode(), "X...O....");
    }

    #[test]
    fn test_validate() {
        assert!(Board::from_string("XO.......").unwrap().validate().is_ok());
        assert!(Board::from_string("XOX......").unwrap().validate().is_ok());
        assert!(Board::from_string("OO.......").unwrap().validate().is_err());
        assert!(Board::from_string("XXX......").unwrap().validate().is_err());
    }

    #[test]
    fn test_player_alternation() {
        let mut board = Board::new();
        for (i, pos) in [0, 1, 2, 4].into_iter().enumerate() {
            let mark = board.next_mark();
            let expected = if i.is_multiple_of(2) {
                Mark::Player
            } else {
                Mark::Opponent
            };
            assert_eq!(mark, expected);
            board = board.apply_move(pos, mark).unwrap();
        }
        assert_eq!(board.count(Mark::Player), 2);
        assert_eq!(board.count(Mark::Opponent), 2);
    }

    #[test]
    fn test_display() {
        let board = Board::from_string("XOX.O.X..").unwrap();
        let display = format!("{board}");
        assert_eq!(display, "XOX\n.O.\nX..");
    }
}
