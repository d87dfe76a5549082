//! Offline training: move log in, persisted predictor state out
//!
//! Each run consumes the entire corpus and replaces the stored state
//! wholesale; there is no incremental fitting.

pub mod dataset;
pub mod fit;
pub mod observers;
pub mod serialization;

pub use dataset::{TrainingExample, build_dataset};
pub use fit::{Trainer, TrainerConfig, TrainingReport};
pub use observers::{MetricsObserver, ProgressObserver};
pub use serialization::{SavedPredictor, TrainingMetadata};
