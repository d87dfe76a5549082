//! Fitting a [`PolicyNetwork`] to the move log

use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{
    dataset::{TrainingExample, build_dataset},
    serialization::{SavedPredictor, TrainingMetadata},
};
use crate::{
    Error, Result,
    model::{Adam, PolicyNetwork},
    ports::{MoveLog, PredictorStore, TrainingObserver},
};

/// Hyperparameters of a training run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainerConfig {
    /// Passes over the whole dataset
    pub epochs: usize,
    /// Examples per gradient step
    pub batch_size: usize,
    /// Adam step size
    pub learning_rate: f32,
    /// Hidden layer widths, input side first
    pub hidden_layers: Vec<usize>,
    /// Seed for weight initialisation and shuffling (None = non-deterministic)
    pub seed: Option<u64>,
}

impl TrainerConfig {
    pub fn with_epochs(mut self, epochs: usize) -> Self {
        self.epochs = epochs;
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn with_learning_rate(mut self, learning_rate: f32) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_hidden_layers(mut self, hidden_layers: Vec<usize>) -> Self {
        self.hidden_layers = hidden_layers;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Reject settings that cannot train anything
    pub fn validate(&self) -> Result<()> {
        let invalid = |message: String| Err(Error::InvalidConfiguration { message });

        if self.epochs == 0 {
            return invalid("epochs must be at least 1".to_string());
        }
        if self.batch_size == 0 {
            return invalid("batch size must be at least 1".to_string());
        }
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return invalid(format!(
                "learning rate {} must be positive and finite",
                self.learning_rate
            ));
        }
        if self.hidden_layers.contains(&0) {
            return invalid("hidden layers must have at least one unit".to_string());
        }
        Ok(())
    }
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            epochs: 20,
            batch_size: 32,
            learning_rate: 0.001,
            hidden_layers: vec![128, 64],
            seed: None,
        }
    }
}

/// Summary of a finished fit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingReport {
    pub examples: usize,
    pub epochs: usize,
    /// Mean loss of every epoch, in order
    pub loss_history: Vec<f32>,
    /// Fraction of examples whose most probable cell matched the label, per epoch
    pub accuracy_history: Vec<f32>,
}

impl TrainingReport {
    pub fn final_loss(&self) -> Option<f32> {
        self.loss_history.last().copied()
    }

    pub fn final_accuracy(&self) -> Option<f32> {
        self.accuracy_history.last().copied()
    }
}

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Batched, multi-epoch supervised training.
///
/// # Examples
///
/// ```
/// use triki::adapters::{InMemoryMoveLog, InMemoryPredictorStore};
/// use triki::corpus::MoveRecord;
/// use triki::ports::{MoveLog, PredictorStore};
/// use triki::tictactoe::{Board, Mark};
/// use triki::trainer::{Trainer, TrainerConfig};
///
/// let log = InMemoryMoveLog::new();
/// log.append(&MoveRecord::new(Board::new(), 4, Mark::Player)?)?;
///
/// let store = InMemoryPredictorStore::new();
/// let config = TrainerConfig::default().with_epochs(2).with_seed(7);
/// let saved = Trainer::new(config).train(&log, &store)?;
///
/// assert_eq!(saved.metadata.examples, 1);
/// assert!(store.exists());
/// # Ok::<(), triki::Error>(())
/// ```
pub struct Trainer {
    config: TrainerConfig,
    observers: Vec<Box<dyn TrainingObserver>>,
}

impl Trainer {
    pub fn new(config: TrainerConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    /// Add an observer (builder style)
    pub fn with_observer(mut self, observer: Box<dyn TrainingObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    /// Read the whole log and turn it into examples.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyCorpus`] if the log holds no records, or the
    /// log's own read error.
    pub fn build_dataset(&self, log: &dyn MoveLog) -> Result<Vec<TrainingExample>> {
        let records = log.read_all()?;
        build_dataset(&records)
    }

    /// Fit a fresh network to `dataset`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyCorpus`] for an empty dataset,
    /// [`Error::InvalidConfiguration`] for unusable hyperparameters, or any
    /// observer error.
    pub fn fit(&mut self, dataset: &[TrainingExample]) -> Result<(PolicyNetwork, TrainingReport)> {
        self.config.validate()?;
        if dataset.is_empty() {
            return Err(Error::EmptyCorpus);
        }

        let epochs = self.config.epochs;
        let batch_size = self.config.batch_size;
        let mut rng = build_rng(self.config.seed);
        let mut network = PolicyNetwork::new(&self.config.hidden_layers, &mut rng);
        let mut optimizer = Adam::new(&network, self.config.learning_rate);

        info!(
            examples = dataset.len(),
            epochs,
            batch_size,
            parameters = network.parameter_count(),
            "training started"
        );
        for observer in &mut self.observers {
            observer.on_training_start(dataset.len(), epochs)?;
        }

        let mut order: Vec<usize> = (0..dataset.len()).collect();
        let mut report = TrainingReport {
            examples: dataset.len(),
            epochs,
            loss_history: Vec::with_capacity(epochs),
            accuracy_history: Vec::with_capacity(epochs),
        };

        for epoch in 1..=epochs {
            order.shuffle(&mut rng);
            let mut total_loss = 0.0;
            let mut hits = 0usize;

            for batch in order.chunks(batch_size) {
                let mut grads = network.zero_gradients();
                for &idx in batch {
                    let example = &dataset[idx];
                    let (loss, hit) =
                        network.accumulate_gradients(&example.features, &example.label, &mut grads);
                    total_loss += loss;
                    hits += usize::from(hit);
                }
                PolicyNetwork::average_gradients(&mut grads, batch.len());
                optimizer.apply(&mut network, &grads);
            }

            let loss = total_loss / dataset.len() as f32;
            let accuracy = hits as f32 / dataset.len() as f32;
            report.loss_history.push(loss);
            report.accuracy_history.push(accuracy);

            debug!(epoch, loss, accuracy, "epoch finished");
            for observer in &mut self.observers {
                observer.on_epoch_end(epoch, loss, accuracy)?;
            }
        }

        info!(
            final_loss = report.final_loss(),
            final_accuracy = report.final_accuracy(),
            "training finished"
        );
        for observer in &mut self.observers {
            observer.on_training_end(&report)?;
        }

        Ok((network, report))
    }

    /// Build the dataset from `log`, fit, and replace the state in `store`.
    ///
    /// # Errors
    ///
    /// Propagates dataset, fitting and persistence errors; the stored state is
    /// only replaced when fitting succeeded.
    pub fn train(&mut self, log: &dyn MoveLog, store: &dyn PredictorStore) -> Result<SavedPredictor> {
        let dataset = self.build_dataset(log)?;
        let (network, report) = self.fit(&dataset)?;
        let metadata = TrainingMetadata::from_report(&report, &self.config);
        let saved = SavedPredictor::new(network, metadata);
        store.save(&saved)?;
        info!(location = %store.location(), "predictor state saved");
        Ok(saved)
    }
}
