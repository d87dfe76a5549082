//! Actor port - the external side of an interactive game (console, GUI, tests)

use crate::{
    Error, Result,
    session::TurnReport,
    tictactoe::{Board, Outcome},
};

/// The human side of a session.
///
/// [`crate::session::GameSession::run`] asks the actor for a cell on every
/// player turn and keeps it informed of what happened.
///
/// # Examples
///
/// ```
/// use triki::{Result, ports::Actor, tictactoe::Board};
///
/// /// Plays the first free cell every time.
/// struct Greedy;
///
/// impl Actor for Greedy {
///     fn request_move(&mut self, board: &Board) -> Result<Option<usize>> {
///         Ok(board.legal_moves().first().copied())
///     }
/// }
/// ```
pub trait Actor {
    /// Ask for the cell to play. `None` abandons the game.
    ///
    /// # Errors
    ///
    /// Returns an error if input cannot be obtained (e.g. stdin closed).
    fn request_move(&mut self, board: &Board) -> Result<Option<usize>>;

    /// Called when the requested move was rejected; the actor is asked again.
    fn on_rejected(&mut self, _board: &Board, _error: &Error) -> Result<()> {
        Ok(())
    }

    /// Called after every accepted move, from either side.
    fn on_turn(&mut self, _report: &TurnReport) -> Result<()> {
        Ok(())
    }

    /// Called once the game is over.
    fn on_game_end(&mut self, _board: &Board, _outcome: Outcome) -> Result<()> {
        Ok(())
    }
}
