//! Observer port - abstraction for training observation
//!
//! Observers let the trainer report progress without coupling the fitting
//! loop to progress bars, logs, or metric collection.

use crate::{Result, trainer::TrainingReport};

/// Observer trait for monitoring a training run
///
/// # Event Sequence
///
/// 1. `on_training_start(examples, epochs)` - once
/// 2. `on_epoch_end(epoch, loss, accuracy)` - after every epoch (1-based)
/// 3. `on_training_end(report)` - once
///
/// # Examples
///
/// ```no_run
/// use triki::ports::TrainingObserver;
///
/// struct LossPrinter;
///
/// impl TrainingObserver for LossPrinter {
///     fn on_epoch_end(&mut self, epoch: usize, loss: f32, _accuracy: f32) -> triki::Result<()> {
///         println!("epoch {epoch}: {loss:.4}");
///         Ok(())
///     }
/// }
/// ```
pub trait TrainingObserver: Send {
    /// Called when fitting starts.
    fn on_training_start(&mut self, _examples: usize, _epochs: usize) -> Result<()> {
        Ok(())
    }

    /// Called after each pass over the dataset with its mean loss and accuracy.
    fn on_epoch_end(&mut self, _epoch: usize, _loss: f32, _accuracy: f32) -> Result<()> {
        Ok(())
    }

    /// Called when fitting completes.
    fn on_training_end(&mut self, _report: &TrainingReport) -> Result<()> {
        Ok(())
    }
}
