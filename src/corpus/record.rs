//! A single logged move

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    tictactoe::{
        Board, CELL_COUNT, Mark,
        encoding::{board_from_values, board_to_values, mark_from_value, mark_to_value},
    },
};

/// Fields per CSV row: nine cells, the chosen cell, the mover
pub const ROW_WIDTH: usize = CELL_COUNT + 2;

/// One turn of play: the board *before* the move, the cell chosen and who
/// chose it.
///
/// Records are only built through [`MoveRecord::new`], which guarantees the
/// chosen cell was empty in the snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveRecord {
    board: Board,
    cell: usize,
    mover: Mark,
}

impl MoveRecord {
    /// Create a record, checking that `cell` is a legal move on `board` and
    /// that `mover` is the side due to move.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidPieceCounts`] if the snapshot breaks
    /// alternation, [`crate::Error::OutOfTurn`] if `mover` is not
    /// [`Board::next_mark`], and [`crate::Error::IllegalMove`] if the cell is
    /// out of range or occupied.
    pub fn new(board: Board, cell: usize, mover: Mark) -> Result<Self> {
        board.validate()?;
        let expected = board.next_mark();
        if mover != expected {
            return Err(Error::OutOfTurn {
                expected,
                attempted: mover,
            });
        }
        board.apply_move(cell, mover)?;
        Ok(Self { board, cell, mover })
    }

    /// Board snapshot before the move
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Chosen cell (0-8)
    pub fn cell(&self) -> usize {
        self.cell
    }

    pub fn mover(&self) -> Mark {
        self.mover
    }

    /// Board after the move was applied
    pub fn board_after(&self) -> Board {
        let mut cells = *self.board.cells();
        cells[self.cell] = self.mover.to_cell();
        Board::from_cells(cells)
    }

    /// Row layout used by the CSV move log
    pub fn to_fields(&self) -> [i64; ROW_WIDTH] {
        let mut fields = [0i64; ROW_WIDTH];
        for (field, value) in fields.iter_mut().zip(board_to_values(&self.board)) {
            *field = i64::from(value);
        }
        fields[CELL_COUNT] = self.cell as i64;
        fields[CELL_COUNT + 1] = i64::from(mark_to_value(self.mover));
        fields
    }

    /// Rebuild a record from the row fields: cell values, chosen cell, mover value.
    pub fn from_fields(values: &[i64; CELL_COUNT], cell: usize, mover: i64) -> Result<Self> {
        let board = board_from_values(values)?;
        let mover = mark_from_value(mover)?;
        Self::new(board, cell, mover)
    }
}
