//! In-memory move log for testing.

use std::sync::{
    Arc, Mutex, PoisonError,
    atomic::{AtomicBool, Ordering},
};

use crate::{Result, corpus::MoveRecord, error::Error, ports::MoveLog};

/// In-memory move log.
///
/// All clones share the same underlying storage, so a test can hand one clone
/// to a session and inspect the other.
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
/// let view = log.clone();
/// log.append(&MoveRecord::new(Board::new(), 0, Mark::Player)?)?;
/// assert_eq!(view.len(), 1);
/// # Ok::<(), triki::Error>(())
/// ```
#[derive(Clone, Default)]
pub struct InMemoryMoveLog {
    records: Arc<Mutex<Vec<MoveRecord>>>,
    fail_appends: Arc<AtomicBool>,
}

impl InMemoryMoveLog {
    /// Create a new empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a log pre-filled with `records`.
    pub fn with_records(records: Vec<MoveRecord>) -> Self {
        Self {
            records: Arc::new(Mutex::new(records)),
            fail_appends: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Number of records stored.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Make subsequent appends fail with an I/O error.
    ///
    /// Useful for exercising the "failed append is not a played turn" path.
    pub fn set_fail_appends(&self, fail: bool) {
        self.fail_appends.store(fail, Ordering::SeqCst);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<MoveRecord>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl MoveLog for InMemoryMoveLog {
    fn append(&self, record: &MoveRecord) -> Result<()> {
        if self.fail_appends.load(Ordering::SeqCst) {
            return Err(Error::Io {
                operation: "append to in-memory move log".to_string(),
                source: std::io::Error::other("appends disabled"),
            });
        }
        self.lock().push(*record);
        Ok(())
    }

    fn read_all(&self) -> Result<Vec<MoveRecord>> {
        Ok(self.lock().clone())
    }
}
