//! Dependency injection container for the triki application.
//!
//! The container owns the move log and the predictor store and wires them
//! into sessions, training runs and corpus analysis.

use std::sync::Arc;

use tracing::{info, warn};

use super::config::AppConfig;
use crate::{
    Result,
    adapters::{CsvMoveLog, InMemoryMoveLog, InMemoryPredictorStore, MsgPackPredictorStore},
    analysis::CorpusStats,
    error::Error,
    ports::{MoveLog, MovePredictor, PredictorStore, TrainingObserver},
    predictor::FallbackPredictor,
    session::GameSession,
    trainer::{SavedPredictor, Trainer, TrainerConfig},
};

/// Application with dependency injection.
///
/// # Examples
///
/// ## Production usage
///
/// ```no_run
/// use triki::app::{App, AppConfig};
///
/// let app = App::from_config(&AppConfig::default().with_model_path("models/triki.msgpack"));
/// let saved = app.train(Vec::new())?;
/// println!("trained on {} moves", saved.metadata.examples);
/// # Ok::<(), triki::Error>(())
/// ```
///
/// ## Testing with dependency injection
///
/// ```
/// use triki::app::App;
/// use triki::adapters::{InMemoryMoveLog, InMemoryPredictorStore};
///
/// let app = App::for_testing()
///     .with_move_log(InMemoryMoveLog::new())
///     .with_predictor_store(InMemoryPredictorStore::new())
///     .build();
///
/// // Nothing trained yet: sessions play the fallback predictor
/// let session = app.new_session()?;
/// assert_eq!(session.predictor_name(), "fallback");
/// # Ok::<(), triki::Error>(())
/// ```
pub struct App {
    move_log: Arc<dyn MoveLog>,
    predictor_store: Arc<dyn PredictorStore>,
    trainer_config: TrainerConfig,
}

impl App {
    /// Create an app with production defaults (`moves.csv`, `triki_model.msgpack`).
    pub fn new() -> Self {
        Self::from_config(&AppConfig::default())
    }

    /// Create an app backed by the files named in `config`.
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            move_log: Arc::new(CsvMoveLog::new(&config.move_log_path)),
            predictor_store: Arc::new(MsgPackPredictorStore::new(&config.model_path)),
            trainer_config: config.trainer.clone(),
        }
    }

    /// Create a builder for constructing an app with custom dependencies.
    ///
    /// Unset dependencies default to in-memory adapters.
    pub fn for_testing() -> AppBuilder {
        AppBuilder::new()
    }

    /// The shared move log
    pub fn move_log(&self) -> Arc<dyn MoveLog> {
        Arc::clone(&self.move_log)
    }

    pub fn predictor_store(&self) -> Arc<dyn PredictorStore> {
        Arc::clone(&self.predictor_store)
    }

    pub fn trainer_config(&self) -> &TrainerConfig {
        &self.trainer_config
    }

    /// The predictor a new session should play.
    ///
    /// A saved state yields the trained predictor; no saved state yields the
    /// lowest-index fallback.
    ///
    /// # Errors
    ///
    /// Returns an error if a saved state exists but cannot be read or decoded.
    pub fn load_predictor(&self) -> Result<Box<dyn MovePredictor>> {
        match self.predictor_store.load() {
            Ok(saved) => {
                info!(
                    location = %self.predictor_store.location(),
                    examples = saved.metadata.examples,
                    "loaded trained predictor"
                );
                Ok(Box::new(saved.into_predictor()))
            }
            Err(Error::NoSavedModel { .. }) => {
                info!(
                    location = %self.predictor_store.location(),
                    "no trained predictor, using fallback"
                );
                Ok(Box::new(FallbackPredictor::new()))
            }
            Err(err) => {
                warn!(
                    location = %self.predictor_store.location(),
                    error = %err,
                    "failed to load predictor"
                );
                Err(err)
            }
        }
    }

    /// Start a session on a fresh board with the current predictor.
    ///
    /// # Errors
    ///
    /// Same as [`App::load_predictor`].
    pub fn new_session(&self) -> Result<GameSession> {
        let predictor = self.load_predictor()?;
        Ok(GameSession::new(self.move_log(), predictor))
    }

    /// Retrain from the whole move log and replace the saved state.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyCorpus`] when nothing was logged yet, or any
    /// read, fit or save error.
    pub fn train(&self, observers: Vec<Box<dyn TrainingObserver>>) -> Result<SavedPredictor> {
        let mut trainer = Trainer::new(self.trainer_config.clone());
        for observer in observers {
            trainer = trainer.with_observer(observer);
        }
        trainer.train(self.move_log.as_ref(), self.predictor_store.as_ref())
    }

    /// Summarise the move log.
    ///
    /// # Errors
    ///
    /// Returns the log's read error.
    pub fn corpus_stats(&self) -> Result<CorpusStats> {
        let records = self.move_log.read_all()?;
        Ok(CorpusStats::from_records(&records))
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for constructing an app with custom dependencies.
///
/// # Examples
///
/// ```
/// use triki::app::AppBuilder;
/// use triki::adapters::InMemoryMoveLog;
///
/// let app = AppBuilder::new()
///     .with_move_log(InMemoryMoveLog::new())
///     .with_default_seed(42)
///     .build();
/// assert_eq!(app.trainer_config().seed, Some(42));
/// ```
pub struct AppBuilder {
    move_log: Option<Arc<dyn MoveLog>>,
    predictor_store: Option<Arc<dyn PredictorStore>>,
    trainer_config: TrainerConfig,
}

impl AppBuilder {
    pub fn new() -> Self {
        Self {
            move_log: None,
            predictor_store: None,
            trainer_config: TrainerConfig::default(),
        }
    }

    pub fn with_move_log<L: MoveLog + 'static>(mut self, log: L) -> Self {
        self.move_log = Some(Arc::new(log));
        self
    }

    pub fn with_predictor_store<S: PredictorStore + 'static>(mut self, store: S) -> Self {
        self.predictor_store = Some(Arc::new(store));
        self
    }

    pub fn with_trainer_config(mut self, config: TrainerConfig) -> Self {
        self.trainer_config = config;
        self
    }

    /// Seed every training run, for deterministic tests.
    pub fn with_default_seed(mut self, seed: u64) -> Self {
        self.trainer_config.seed = Some(seed);
        self
    }

    pub fn build(self) -> App {
        App {
            move_log: self
                .move_log
                .unwrap_or_else(|| Arc::new(InMemoryMoveLog::new())),
            predictor_store: self
                .predictor_store
                .unwrap_or_else(|| Arc::new(InMemoryPredictorStore::new())),
            trainer_config: self.trainer_config,
        }
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}
