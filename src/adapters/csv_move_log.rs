//! CSV implementation of the move log.
//!
//! One record per line, eleven comma-separated integers: nine cell values
//! (`1` player, `-1` opponent, `0` empty), the chosen cell, and the mover
//! (`1` or `-1`). No header row; lines are only ever appended.
//!
//! An append interrupted mid-row leaves a partial last line. Readers skip it
//! and the next append cuts it off before writing.

use std::{
    fs::{File, OpenOptions},
    io::{Read, Seek, SeekFrom, Write},
    path::{Path, PathBuf},
    sync::{Mutex, PoisonError},
};

use csv::{ReaderBuilder, StringRecord, Trim, WriterBuilder};
use tracing::{debug, warn};

use crate::{
    Result,
    corpus::{MoveRecord, ROW_WIDTH},
    error::Error,
    ports::MoveLog,
    tictactoe::CELL_COUNT,
};

/// Default file name of the shared corpus
pub const DEFAULT_LOG_FILE: &str = "moves.csv";

/// File-backed move log.
///
/// Each append serialises the whole row first and hands it to the OS in a
/// single `write_all` on a file opened in append mode. Writers inside the
/// process are additionally serialised by a mutex, so sessions sharing one
/// `CsvMoveLog` never interleave rows.
///
/// # Examples
///
/// ```no_run
/// use triki::adapters::CsvMoveLog;
/// use triki::ports::MoveLog;
///
/// let log = CsvMoveLog::new("moves.csv");
/// for record in log.read_all()? {
///     println!("{} -> {}", record.board().encode(), record.cell());
/// }
/// # Ok::<(), triki::Error>(())
/// ```
#[derive(Debug)]
pub struct CsvMoveLog {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl CsvMoveLog {
    /// Create a log stored at `path`. The file is created on first append.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn encode_row(record: &MoveRecord) -> Result<Vec<u8>> {
        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .from_writer(Vec::new());
        writer.write_record(record.to_fields().iter().map(|v| v.to_string()))?;
        writer
            .into_inner()
            .map_err(|e| Error::SerializationContext {
                operation: "encode move record as CSV".to_string(),
                message: e.to_string(),
            })
    }

    fn parse_row(row: &StringRecord, line: usize) -> Result<MoveRecord> {
        let invalid = |reason: String| Error::InvalidRecord { line, reason };

        if row.len() != ROW_WIDTH {
            return Err(invalid(format!(
                "expected {ROW_WIDTH} fields, got {}",
                row.len()
            )));
        }

        let mut values = [0i64; CELL_COUNT];
        for (i, value) in values.iter_mut().enumerate() {
            *value = row[i]
                .parse()
                .map_err(|_| invalid(format!("cell {i} is not an integer: '{}'", &row[i])))?;
        }
        let cell: usize = row[CELL_COUNT].parse().map_err(|_| {
            invalid(format!(
                "chosen cell is not a cell index: '{}'",
                &row[CELL_COUNT]
            ))
        })?;
        let mover: i64 = row[CELL_COUNT + 1].parse().map_err(|_| {
            invalid(format!(
                "mover is not an integer: '{}'",
                &row[CELL_COUNT + 1]
            ))
        })?;

        MoveRecord::from_fields(&values, cell, mover).map_err(|e| invalid(e.to_string()))
    }

    /// True when the file is non-empty and its last byte is not a newline,
    /// i.e. an earlier write was cut off mid-row.
    fn ends_mid_row(file: &mut File) -> std::io::Result<bool> {
        let len = file.seek(SeekFrom::End(0))?;
        if len == 0 {
            return Ok(false);
        }
        file.seek(SeekFrom::End(-1))?;
        let mut last = [0u8; 1];
        file.read_exact(&mut last)?;
        Ok(last[0] != b'\n')
    }

    /// Repair a log whose last row lacks its newline. A row with all eleven
    /// integer fields only gets terminated; anything shorter is cut off.
    /// Returns the number of bytes dropped.
    fn repair_tail(file: &mut File) -> std::io::Result<usize> {
        let mut contents = Vec::new();
        file.seek(SeekFrom::Start(0))?;
        file.read_to_end(&mut contents)?;
        let start = contents
            .iter()
            .rposition(|&b| b == b'\n')
            .map_or(0, |idx| idx + 1);
        let tail = &contents[start..];

        if Self::is_complete_row(tail) {
            file.write_all(b"\n")?;
            return Ok(0);
        }
        file.set_len(start as u64)?;
        Ok(tail.len())
    }

    fn is_complete_row(bytes: &[u8]) -> bool {
        std::str::from_utf8(bytes).is_ok_and(|text| {
            let fields: Vec<&str> = text.trim().split(',').collect();
            fields.len() == ROW_WIDTH && fields.iter().all(|f| f.trim().parse::<i64>().is_ok())
        })
    }
}

impl MoveLog for CsvMoveLog {
    fn append(&self, record: &MoveRecord) -> Result<()> {
        let row = Self::encode_row(record)?;

        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| Error::Io {
                operation: format!("open move log {:?}", self.path),
                source,
            })?;

        let partial = Self::ends_mid_row(&mut file).map_err(|source| Error::Io {
            operation: format!("inspect move log {:?}", self.path),
            source,
        })?;
        if partial {
            let dropped = Self::repair_tail(&mut file).map_err(|source| Error::Io {
                operation: format!("repair last row of {:?}", self.path),
                source,
            })?;
            if dropped > 0 {
                warn!(
                    path = %self.path.display(),
                    bytes = dropped,
                    "dropped partial row left by an interrupted append"
                );
            }
        }

        file.write_all(&row).map_err(|source| Error::Io {
            operation: format!("append to move log {:?}", self.path),
            source,
        })?;
        file.sync_data().map_err(|source| Error::Io {
            operation: format!("sync move log {:?}", self.path),
            source,
        })?;

        debug!(
            cell = record.cell(),
            mover = %record.mover(),
            path = %self.path.display(),
            "appended move record"
        );
        Ok(())
    }

    fn read_all(&self) -> Result<Vec<MoveRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let unterminated = File::open(&self.path)
            .and_then(|mut file| Self::ends_mid_row(&mut file))
            .map_err(|source| Error::Io {
                operation: format!("open move log {:?}", self.path),
                source,
            })?;

        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .from_path(&self.path)?;

        let rows = reader.records().collect::<std::result::Result<Vec<_>, _>>()?;
        let last = rows.len().saturating_sub(1);

        let mut records = Vec::with_capacity(rows.len());
        for (idx, row) in rows.iter().enumerate() {
            let line = row
                .position()
                .map(|p| p.line() as usize)
                .unwrap_or(idx + 1);
            match Self::parse_row(row, line) {
                Ok(record) => records.push(record),
                // An interrupted append leaves at most one partial row, at the end.
                Err(err) if unterminated && idx == last => {
                    warn!(path = %self.path.display(), error = %err, "ignoring partial final row");
                }
                Err(err) => return Err(err),
            }
        }

        debug!(
            records = records.len(),
            path = %self.path.display(),
            "read move log"
        );
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use std::{fs, sync::Arc, thread};

    use tempfile::TempDir;

    use super::*;
    use crate::tictactoe::{Board, Mark};

    fn sample_records() -> Vec<MoveRecord> {
        let empty = Board::new();
        let first = MoveRecord::new(empty, 4, Mark::Player).unwrap();
        let second = MoveRecord::new(first.board_after(), 0, Mark::Opponent).unwrap();
        let third = MoveRecord::new(second.board_after(), 8, Mark::Player).unwrap();
        vec![first, second, third]
    }

    #[test]
    fn test_append_then_read_all() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let log = CsvMoveLog::new(temp_dir.path().join("moves.csv"));

        let records = sample_records();
        for record in &records {
            log.append(record).expect("Failed to append");
        }

        let loaded = log.read_all().expect("Failed to read");
        assert_eq!(loaded, records);
    }

    #[test]
    fn test_file_format() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("moves.csv");
        let log = CsvMoveLog::new(&path);

        for record in sample_records().iter().take(2) {
            log.append(record).unwrap();
        }

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents,
            "0,0,0,0,0,0,0,0,0,4,1\n0,0,0,0,1,0,0,0,0,0,-1\n"
        );
    }

    #[test]
    fn test_missing_file_reads_as_empty() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let log = CsvMoveLog::new(temp_dir.path().join("absent.csv"));
        assert!(log.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_malformed_row_reports_line() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("moves.csv");
        fs::write(&path, "0,0,0,0,0,0,0,0,0,4,1\n0,0,0,0,1,0,0,0,0,4,-1\n").unwrap();

        let err = CsvMoveLog::new(&path).read_all().unwrap_err();
        assert!(
            matches!(err, Error::InvalidRecord { line: 2, .. }),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn test_rows_out_of_turn_rejected() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("moves.csv");

        // Opponent opening on an empty board
        fs::write(&path, "0,0,0,0,0,0,0,0,0,4,-1\n").unwrap();
        let err = CsvMoveLog::new(&path).read_all().unwrap_err();
        assert!(
            matches!(err, Error::InvalidRecord { line: 1, .. }),
            "unexpected error: {err}"
        );

        // Player moving again on a board with two X and no O
        fs::write(&path, "0,0,0,0,0,0,0,0,0,4,1\n1,1,0,0,0,0,0,0,0,2,1\n").unwrap();
        let err = CsvMoveLog::new(&path).read_all().unwrap_err();
        assert!(
            matches!(err, Error::InvalidRecord { line: 2, .. }),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn test_partial_final_row_is_ignored_on_read() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("moves.csv");
        fs::write(&path, "0,0,0,0,0,0,0,0,0,4,1\n0,0,0,0,1").unwrap();

        let loaded = CsvMoveLog::new(&path).read_all().unwrap();
        assert_eq!(loaded, vec![sample_records()[0]]);
    }

    #[test]
    fn test_append_after_partial_row() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("moves.csv");
        fs::write(&path, "0,0,0,0,0,0,0,0,0,4,1\n0,0,0,0,1").unwrap();

        let log = CsvMoveLog::new(&path);
        let records = sample_records();
        log.append(&records[1]).expect("append after an interrupted row");

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "0,0,0,0,0,0,0,0,0,4,1\n0,0,0,0,1,0,0,0,0,0,-1\n"
        );
        assert_eq!(log.read_all().unwrap(), records[..2]);
    }

    #[test]
    fn test_append_after_complete_row_without_newline() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("moves.csv");
        fs::write(&path, "0,0,0,0,0,0,0,0,0,4,1").unwrap();

        let log = CsvMoveLog::new(&path);
        let records = sample_records();
        assert_eq!(log.read_all().unwrap(), records[..1]);

        log.append(&records[1]).unwrap();
        assert_eq!(log.read_all().unwrap(), records[..2]);
    }

    #[test]
    fn test_partial_row_as_whole_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("moves.csv");
        fs::write(&path, "0,0,0").unwrap();

        let log = CsvMoveLog::new(&path);
        assert!(log.read_all().unwrap().is_empty());

        log.append(&sample_records()[0]).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "0,0,0,0,0,0,0,0,0,4,1\n");
    }

    #[test]
    fn test_short_row_rejected() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("moves.csv");
        fs::write(&path, "0,0,0\n0,0,0,0,0,0,0,0,0,4,1\n").unwrap();

        let err = CsvMoveLog::new(&path).read_all().unwrap_err();
        assert!(err.to_string().contains("expected 11 fields"));
    }

    #[test]
    fn test_append_to_invalid_path_returns_error() {
        let log = CsvMoveLog::new("/invalid_dir_12345/moves.csv");
        let record = sample_records()[0];
        assert!(matches!(log.append(&record), Err(Error::Io { .. })));
    }

    #[test]
    fn test_concurrent_appends_do_not_interleave() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let log = Arc::new(CsvMoveLog::new(temp_dir.path().join("moves.csv")));
        let records = sample_records();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let log = Arc::clone(&log);
                let records = records.clone();
                thread::spawn(move || {
                    for _ in 0..25 {
                        for record in &records {
                            log.append(record).unwrap();
                        }
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let loaded = log.read_all().expect("every row should parse");
        assert_eq!(loaded.len(), 4 * 25 * records.len());
        assert!(loaded.iter().all(|r| records.contains(r)));
    }
}
