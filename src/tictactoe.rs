//! Tic-Tac-Toe game rules

pub mod board;
pub mod encoding;
pub mod lines;
pub mod outcome;

pub use board::{Board, CELL_COUNT, Cell, Mark};
pub use lines::{LineAnalyzer, WINNING_LINES};
pub use outcome::{Outcome, evaluate};
