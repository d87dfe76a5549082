//! CSV move log shared by concurrent sessions.

mod common;

use std::{sync::Arc, thread};

use common::ScriptedActor;
use tempfile::TempDir;
use triki::{
    Mark, Outcome,
    adapters::CsvMoveLog,
    analysis::CorpusStats,
    ports::MoveLog,
    predictor::FallbackPredictor,
    session::GameSession,
    trainer::build_dataset,
};

#[test]
fn test_concurrent_sessions_append_whole_rows() {
    let dir = TempDir::new().unwrap();
    let log: Arc<dyn MoveLog> = Arc::new(CsvMoveLog::new(dir.path().join("moves.csv")));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let log = Arc::clone(&log);
            thread::spawn(move || {
                let mut session = GameSession::new(log, Box::new(FallbackPredictor));
                let mut actor = ScriptedActor::new(&[4, 2, 6]);
                session.run(&mut actor).unwrap()
            })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), Some(Outcome::PlayerWin));
    }

    let records = log.read_all().unwrap();
    assert_eq!(records.len(), 8 * 5);

    let stats = CorpusStats::from_records(&records);
    assert_eq!(stats.games_started, 8);
    assert_eq!(stats.player_moves, 8 * 3);
    assert_eq!(stats.opponent_moves, 8 * 2);
    assert_eq!(stats.outcomes.player_wins, 8);
}

#[test]
fn test_hand_edited_log_is_readable() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("moves.csv");
    std::fs::write(
        &path,
        "0,0,0,0,0,0,0,0,0,4,1\n 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, -1\n",
    )
    .unwrap();

    let log = CsvMoveLog::new(&path);
    let records = log.read_all().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].mover(), Mark::Opponent);
    assert_eq!(records[1].board().encode(), "....X....");

    let dataset = build_dataset(&records).unwrap();
    assert_eq!(dataset[1].chosen_cell(), 0);
}
