//! Move log port: the durable, append-only corpus of played moves.

use crate::{Result, corpus::MoveRecord};

/// Port for the shared move log.
///
/// Every session appends to the same log, so implementations must accept
/// concurrent `append` calls without interleaving the bytes of two records.
///
/// # Examples
///
/// ```
/// use triki::adapters::InMemoryMoveLog;
/// use triki::corpus::MoveRecord;
/// use triki::ports::MoveLog;
/// use triki::tictactoe::{Board, Mark};
///
/// let log = InMemoryMoveLog::new();
/// log.append(&MoveRecord::new(Board::new(), 4, Mark::Player)?)?;
/// assert_eq!(log.read_all()?.len(), 1);
/// # Ok::<(), triki::Error>(())
/// ```
pub trait MoveLog: Send + Sync {
    /// Durably append one record.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written. A failed append must
    /// not be treated as a played turn.
    fn append(&self, record: &MoveRecord) -> Result<()>;

    /// Read back every record in append order.
    ///
    /// An empty log yields an empty vector; refusing to train on it is the
    /// trainer's decision, not the log's.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or holds a malformed record.
    fn read_all(&self) -> Result<Vec<MoveRecord>>;
}
