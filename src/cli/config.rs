//! Shared configuration arguments for CLI commands

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use crate::app::AppConfig;

/// Where the move log and the trained state live
#[derive(Args, Debug, Clone, Default)]
pub struct StorageArgs {
    /// JSON configuration file
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Move log CSV file (overrides the config file)
    #[arg(long)]
    pub moves: Option<PathBuf>,

    /// Trained model file (overrides the config file)
    #[arg(long)]
    pub model: Option<PathBuf>,
}

impl StorageArgs {
    /// Config file values, or defaults, with command-line overrides applied
    pub fn resolve(&self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::from_file(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => AppConfig::default(),
        };
        if let Some(moves) = &self.moves {
            config = config.with_move_log_path(moves);
        }
        if let Some(model) = &self.model {
            config = config.with_model_path(model);
        }
        Ok(config)
    }
}
