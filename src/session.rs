//! Game session: turn alternation between the player and the predictor
//!
//! A session owns the live board and its turn state. Every accepted move,
//! from either side, is appended to the shared move log before the board
//! changes, so a failed append never counts as a played turn.

use std::{fmt, sync::Arc};

use tracing::{debug, info};

use crate::{
    Error, Result,
    corpus::MoveRecord,
    ports::{Actor, MoveLog, MovePredictor},
    predictor::select_checked,
    tictactoe::{Board, Mark, Outcome, evaluate},
};

/// Where a session is in its game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    AwaitingPlayerMove,
    AwaitingOpponentMove,
    Terminal(Outcome),
}

impl SessionState {
    fn after(mark: Mark, outcome: Outcome) -> Self {
        if outcome.is_terminal() {
            SessionState::Terminal(outcome)
        } else {
            match mark.other() {
                Mark::Player => SessionState::AwaitingPlayerMove,
                Mark::Opponent => SessionState::AwaitingOpponentMove,
            }
        }
    }
}

/// What one accepted move did
#[derive(Debug, Clone, PartialEq)]
pub struct TurnReport {
    /// The logged record (board before the move)
    pub record: MoveRecord,
    /// Board after the move
    pub board: Board,
    pub outcome: Outcome,
    /// The predictor's own answer was illegal and a safe cell was played instead
    pub substituted: bool,
}

/// One game at a time against a move predictor.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use triki::adapters::InMemoryMoveLog;
/// use triki::predictor::FallbackPredictor;
/// use triki::session::{GameSession, SessionState};
///
/// let log = InMemoryMoveLog::new();
/// let mut session = GameSession::new(Arc::new(log.clone()), Box::new(FallbackPredictor));
///
/// session.play_player_move(4)?;
/// let reply = session.play_opponent_move()?;
///
/// assert_eq!(reply.record.cell(), 0);
/// assert_eq!(session.board().encode(), "O...X....");
/// assert_eq!(session.state(), SessionState::AwaitingPlayerMove);
/// assert_eq!(log.len(), 2);
/// # Ok::<(), triki::Error>(())
/// ```
pub struct GameSession {
    log: Arc<dyn MoveLog>,
    predictor: Box<dyn MovePredictor>,
    board: Board,
    state: SessionState,
    history: Vec<MoveRecord>,
}

impl GameSession {
    /// Start with an empty board, player to move.
    pub fn new(log: Arc<dyn MoveLog>, predictor: Box<dyn MovePredictor>) -> Self {
        Self {
            log,
            predictor,
            board: Board::new(),
            state: SessionState::AwaitingPlayerMove,
            history: Vec::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Records of the current game, oldest first
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    pub fn predictor_name(&self) -> &str {
        self.predictor.name()
    }

    /// Swap the opponent, e.g. after a retrain. Takes effect on the next move.
    pub fn replace_predictor(&mut self, predictor: Box<dyn MovePredictor>) {
        info!(
            from = self.predictor.name(),
            to = predictor.name(),
            "predictor replaced"
        );
        self.predictor = predictor;
    }

    /// Start a new game on a fresh board. The move log is untouched.
    pub fn reset(&mut self) {
        self.board = Board::new();
        self.state = SessionState::AwaitingPlayerMove;
        self.history.clear();
        debug!("session reset");
    }

    /// Play `cell` for the human side.
    ///
    /// # Errors
    ///
    /// - [`Error::GameOver`] if the game has ended
    /// - [`Error::OutOfTurn`] if the opponent is to move
    /// - [`Error::IllegalMove`] for an occupied or out-of-range cell
    /// - the log's error if the record could not be appended
    ///
    /// In every error case board and state are unchanged.
    pub fn play_player_move(&mut self, cell: usize) -> Result<TurnReport> {
        self.expect_turn(Mark::Player)?;
        self.commit(Mark::Player, cell, false)
    }

    /// Let the predictor move for the opponent.
    ///
    /// An illegal answer from the predictor is replaced by the lowest legal
    /// cell and flagged in the report.
    ///
    /// # Errors
    ///
    /// Same as [`GameSession::play_player_move`], with the roles swapped, plus
    /// any error the predictor raises.
    pub fn play_opponent_move(&mut self) -> Result<TurnReport> {
        self.expect_turn(Mark::Opponent)?;
        let selection = select_checked(self.predictor.as_mut(), &self.board)?;
        let substituted = selection.is_substitute();
        self.commit(Mark::Opponent, selection.cell, substituted)
    }

    /// Drive one game to the end with `actor` on the player side.
    ///
    /// Rejected player moves are reported to the actor, which is asked again.
    /// Returns `None` if the actor walks away before the game ends.
    ///
    /// # Errors
    ///
    /// Returns actor, predictor and log errors; rejected moves are not errors.
    pub fn run(&mut self, actor: &mut dyn Actor) -> Result<Option<Outcome>> {
        loop {
            match self.state {
                SessionState::Terminal(outcome) => {
                    actor.on_game_end(&self.board, outcome)?;
                    return Ok(Some(outcome));
                }
                SessionState::AwaitingPlayerMove => {
                    let Some(cell) = actor.request_move(&self.board)? else {
                        info!(moves = self.history.len(), "game abandoned");
                        return Ok(None);
                    };
                    match self.play_player_move(cell) {
                        Ok(report) => actor.on_turn(&report)?,
                        Err(err) if err.is_rejected_move() => {
                            debug!(cell, error = %err, "player move rejected");
                            actor.on_rejected(&self.board, &err)?;
                        }
                        Err(err) => return Err(err),
                    }
                }
                SessionState::AwaitingOpponentMove => {
                    let report = self.play_opponent_move()?;
                    actor.on_turn(&report)?;
                }
            }
        }
    }

    fn expect_turn(&self, mark: Mark) -> Result<()> {
        let expected = match self.state {
            SessionState::Terminal(outcome) => return Err(Error::GameOver { outcome }),
            SessionState::AwaitingPlayerMove => Mark::Player,
            SessionState::AwaitingOpponentMove => Mark::Opponent,
        };
        if expected == mark {
            Ok(())
        } else {
            Err(Error::OutOfTurn {
                expected,
                attempted: mark,
            })
        }
    }

    fn commit(&mut self, mark: Mark, cell: usize, substituted: bool) -> Result<TurnReport> {
        let record = MoveRecord::new(self.board, cell, mark)?;
        self.log.append(&record)?;

        self.board = record.board_after();
        self.history.push(record);
        let outcome = evaluate(&self.board);
        self.state = SessionState::after(mark, outcome);

        debug!(mover = %mark, cell, board = %self.board.encode(), "move played");
        if outcome.is_terminal() {
            info!(%outcome, moves = self.history.len(), "game over");
        }

        Ok(TurnReport {
            record,
            board: self.board,
            outcome,
            substituted,
        })
    }
}

impl fmt::Debug for GameSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameSession")
            .field("predictor", &self.predictor.name())
            .field("board", &self.board.encode())
            .field("state", &self.state)
            .field("moves", &self.history.len())
            .finish()
    }
}
