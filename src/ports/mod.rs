//! Ports (trait boundaries) for external dependencies.
//!
//! This module defines the interfaces between the game engine and its
//! collaborators. Following hexagonal architecture, these traits are owned by
//! the domain and implemented by adapters in the infrastructure layer.

pub mod actor;
pub mod move_log;
pub mod observer;
pub mod predictor;
pub mod predictor_store;

pub use actor::Actor;
pub use move_log::MoveLog;
pub use observer::TrainingObserver;
pub use predictor::{CellScorer, MovePredictor};
pub use predictor_store::PredictorStore;
