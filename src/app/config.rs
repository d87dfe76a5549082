//! Application configuration.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    adapters::{DEFAULT_LOG_FILE, DEFAULT_MODEL_FILE},
    error::Error,
    trainer::TrainerConfig,
};

/// Where the app keeps its data and how it trains.
///
/// Loaded from JSON; every field is optional in the file.
///
/// # Examples
///
/// ```
/// use triki::app::AppConfig;
///
/// let config: AppConfig = serde_json::from_str(r#"{ "trainer": { "epochs": 5 } }"#)?;
/// assert_eq!(config.trainer.epochs, 5);
/// assert_eq!(config.trainer.batch_size, 32);
/// assert_eq!(config.move_log_path.to_str(), Some("moves.csv"));
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// CSV move log shared by all sessions
    pub move_log_path: PathBuf,
    /// Trained predictor state
    pub model_path: PathBuf,
    pub trainer: TrainerConfig,
}

impl AppConfig {
    /// Read a JSON config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or the trainer
    /// settings are unusable.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| Error::Io {
            operation: format!("read config {path:?}"),
            source,
        })?;
        let config: AppConfig = serde_json::from_str(&text)?;
        config.trainer.validate()?;
        Ok(config)
    }

    pub fn with_move_log_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.move_log_path = path.into();
        self
    }

    pub fn with_model_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.model_path = path.into();
        self
    }

    pub fn with_trainer(mut self, trainer: TrainerConfig) -> Self {
        self.trainer = trainer;
        self
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            move_log_path: PathBuf::from(DEFAULT_LOG_FILE),
            model_path: PathBuf::from(DEFAULT_MODEL_FILE),
            trainer: TrainerConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_from_file_overrides_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("triki.json");
        fs::write(
            &path,
            r#"{ "model_path": "models/latest.msgpack", "trainer": { "seed": 7 } }"#,
        )
        .unwrap();

        let config = AppConfig::from_file(&path).unwrap();
        assert_eq!(config.model_path, PathBuf::from("models/latest.msgpack"));
        assert_eq!(config.move_log_path, PathBuf::from("moves.csv"));
        assert_eq!(config.trainer.seed, Some(7));
        assert_eq!(config.trainer.epochs, 20);
    }

    #[test]
    fn test_from_file_rejects_bad_trainer() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("triki.json");
        fs::write(&path, r#"{ "trainer": { "batch_size": 0 } }"#).unwrap();

        assert!(matches!(
            AppConfig::from_file(&path),
            Err(Error::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_from_file_missing() {
        let result = AppConfig::from_file(Path::new("/nonexistent_12345/triki.json"));
        assert!(matches!(result, Err(Error::Io { .. })));
    }
}
