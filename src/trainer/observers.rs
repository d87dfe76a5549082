//! Training observers
//!
//! Composable reporting for [`super::Trainer`] runs without coupling the
//! fitting loop to terminal output or metric collection.

use indicatif::{ProgressBar, ProgressStyle};

use super::fit::TrainingReport;
use crate::{Result, ports::TrainingObserver};

/// Progress bar observer - one tick per epoch
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
}

impl ProgressObserver {
    pub fn new() -> Self {
        Self { progress_bar: None }
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl TrainingObserver for ProgressObserver {
    fn on_training_start(&mut self, _examples: usize, epochs: usize) -> Result<()> {
        let pb = ProgressBar::new(epochs as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} epochs ({msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_epoch_end(&mut self, epoch: usize, loss: f32, accuracy: f32) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.set_position(epoch as u64);
            pb.set_message(format!("loss {loss:.4}, accuracy {:.1}%", accuracy * 100.0));
        }
        Ok(())
    }

    fn on_training_end(&mut self, report: &TrainingReport) -> Result<()> {
        if let Some(pb) = self.progress_bar.take() {
            let loss = report.final_loss().unwrap_or(f32::NAN);
            pb.finish_with_message(format!("final loss {loss:.4}"));
        }
        Ok(())
    }
}

/// Metrics observer - keeps per-epoch loss and accuracy
#[derive(Debug, Default)]
pub struct MetricsObserver {
    losses: Vec<f32>,
    accuracies: Vec<f32>,
}

impl MetricsObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn losses(&self) -> &[f32] {
        &self.losses
    }

    pub fn accuracies(&self) -> &[f32] {
        &self.accuracies
    }
}

impl TrainingObserver for MetricsObserver {
    fn on_training_start(&mut self, _examples: usize, epochs: usize) -> Result<()> {
        self.losses = Vec::with_capacity(epochs);
        self.accuracies = Vec::with_capacity(epochs);
        Ok(())
    }

    fn on_epoch_end(&mut self, _epoch: usize, loss: f32, accuracy: f32) -> Result<()> {
        self.losses.push(loss);
        self.accuracies.push(accuracy);
        Ok(())
    }
}
