//! Adapters implementing domain ports.
//!
//! This module contains infrastructure implementations of the traits defined
//! in the ports module. Following hexagonal architecture, adapters depend on
//! domain ports, not the other way around.

pub mod csv_move_log;
pub mod in_memory_move_log;
pub mod in_memory_predictor_store;
pub mod msgpack_predictor_store;

pub use csv_move_log::{CsvMoveLog, DEFAULT_LOG_FILE};
pub use in_memory_move_log::InMemoryMoveLog;
pub use in_memory_predictor_store::InMemoryPredictorStore;
pub use msgpack_predictor_store::{DEFAULT_MODEL_FILE, MsgPackPredictorStore};
