//! Persisted predictor state
//!
//! The saved blob carries the fitted network plus enough metadata to tell a
//! player what they are up against.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use super::fit::{TrainerConfig, TrainingReport};
use crate::{Error, Result, model::PolicyNetwork, predictor::TrainedPredictor};

/// Facts about the run that produced a saved network
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingMetadata {
    pub examples: usize,
    pub epochs: usize,
    pub batch_size: usize,
    pub final_loss: Option<f32>,
    pub final_accuracy: Option<f32>,
    pub seed: Option<u64>,
    /// Milliseconds since the Unix epoch
    pub saved_at_ms: Option<u64>,
}

impl TrainingMetadata {
    pub fn from_report(report: &TrainingReport, config: &TrainerConfig) -> Self {
        let saved_at_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .ok()
            .and_then(|d| u64::try_from(d.as_millis()).ok());

        Self {
            examples: report.examples,
            epochs: report.epochs,
            batch_size: config.batch_size,
            final_loss: report.final_loss(),
            final_accuracy: report.final_accuracy(),
            seed: config.seed,
            saved_at_ms,
        }
    }
}

/// Everything a predictor store keeps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedPredictor {
    pub version: u32,
    pub network: PolicyNetwork,
    pub metadata: TrainingMetadata,
}

impl SavedPredictor {
    /// Current blob layout
    pub const VERSION: u32 = 1;

    pub fn new(network: PolicyNetwork, metadata: TrainingMetadata) -> Self {
        Self {
            version: Self::VERSION,
            network,
            metadata,
        }
    }

    /// Reject blobs written by an incompatible layout
    pub fn check_version(&self) -> Result<()> {
        if self.version == Self::VERSION {
            Ok(())
        } else {
            Err(Error::SerializationContext {
                operation: "load predictor".to_string(),
                message: format!(
                    "unsupported state version {} (expected {})",
                    self.version,
                    Self::VERSION
                ),
            })
        }
    }

    pub fn into_predictor(self) -> TrainedPredictor<PolicyNetwork> {
        TrainedPredictor::new(self.network)
    }
}
