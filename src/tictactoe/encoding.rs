//! Numeric encoding at the boundary to the move log and the scorer.
//!
//! Inside the crate cells and movers are enums. Only the CSV corpus and the
//! numeric scorer see the tri-state integers: empty `0`, player `1`,
//! opponent `-1`. Movers use the same `1`/`-1` pair.

use super::{Board, Cell, Mark, board::CELL_COUNT};
use crate::{Error, Result};

/// Integer value of a cell
pub fn cell_to_value(cell: Cell) -> i8 {
    match cell {
        Cell::Empty => 0,
        Cell::Player => 1,
        Cell::Opponent => -1,
    }
}

/// Cell for an integer value
///
/// # Errors
///
/// Returns [`Error::InvalidCellValue`] for anything outside {-1, 0, 1}.
pub fn cell_from_value(value: i64) -> Result<Cell> {
    match value {
        0 => Ok(Cell::Empty),
        1 => Ok(Cell::Player),
        -1 => Ok(Cell::Opponent),
        _ => Err(Error::InvalidCellValue { value }),
    }
}

/// Integer value of a mover
pub fn mark_to_value(mark: Mark) -> i8 {
    match mark {
        Mark::Player => 1,
        Mark::Opponent => -1,
    }
}

/// Mover for an integer value
///
/// # Errors
///
/// Returns [`Error::InvalidMoverValue`] for anything other than 1 or -1.
pub fn mark_from_value(value: i64) -> Result<Mark> {
    match value {
        1 => Ok(Mark::Player),
        -1 => Ok(Mark::Opponent),
        _ => Err(Error::InvalidMoverValue { value }),
    }
}

/// Board as nine integers
pub fn board_to_values(board: &Board) -> [i8; CELL_COUNT] {
    let cells = *board.cells();
    cells.map(cell_to_value)
}

/// Board from nine integers
pub fn board_from_values(values: &[i64; CELL_COUNT]) -> Result<Board> {
    let mut cells = [Cell::Empty; CELL_COUNT];
    for (cell, &value) in cells.iter_mut().zip(values) {
        *cell = cell_from_value(value)?;
    }
    Ok(Board::from_cells(cells))
}

/// Feature vector handed to the scorer
pub fn encode_features(board: &Board) -> [f32; CELL_COUNT] {
    let cells = *board.cells();
    cells.map(|c| f32::from(cell_to_value(c)))
}

/// One-hot target vector for a chosen cell.
///
/// `cell` must be below 9; records are validated before they get here.
pub fn one_hot(cell: usize) -> [f32; CELL_COUNT] {
    let mut label = [0.0; CELL_COUNT];
    label[cell] = 1.0;
    label
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_values() {
        for cell in [Cell::Empty, Cell::Player, Cell::Opponent] {
            let value = cell_to_value(cell);
            assert_eq!(cell_from_value(i64::from(value)).unwrap(), cell);
        }
        assert!(matches!(
            cell_from_value(2),
            Err(Error::InvalidCellValue { value: 2 })
        ));
    }

    #[test]
    fn test_mark_values() {
        assert_eq!(mark_to_value(Mark::Player), 1);
        assert_eq!(mark_to_value(Mark::Opponent), -1);
        assert_eq!(mark_from_value(-1).unwrap(), Mark::Opponent);
        assert!(mark_from_value(0).is_err());
    }

    #[test]
    fn test_encode_features() {
        let board = Board::from_string("X...O....").unwrap();
        assert_eq!(
            encode_features(&board),
            [1.0, 0.0, 0.0, 0.0, -1.0, 0.0, 0.0, 0.0, 0.0]
        );
        assert_eq!(board_to_values(&board), [1, 0, 0, 0, -1, 0, 0, 0, 0]);
    }

    #[test]
    fn test_board_from_values() {
        let board = board_from_values(&[0, 0, 0, 0, 1, 0, 0, 0, -1]).unwrap();
        assert_eq!(board.encode(), "....X...O");
        assert!(board_from_values(&[0, 0, 0, 0, 5, 0, 0, 0, 0]).is_err());
    }

    #[test]
    fn test_one_hot() {
        let label = one_hot(3);
        assert_eq!(label.iter().sum::<f32>(), 1.0);
        assert_eq!(label[3], 1.0);
    }
}
