//! Train command - Refit the predictor on every recorded move

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    app::App,
    cli::{
        config::StorageArgs,
        output::{format_number, print_kv, print_section},
    },
    error::Error,
    ports::TrainingObserver,
    trainer::ProgressObserver,
};

#[derive(Parser, Debug)]
#[command(about = "Train the predictor from the move log")]
pub struct TrainArgs {
    #[command(flatten)]
    pub storage: StorageArgs,

    /// Passes over the dataset
    #[arg(long, short = 'e')]
    pub epochs: Option<usize>,

    /// Examples per gradient step
    #[arg(long, short = 'b')]
    pub batch_size: Option<usize>,

    /// Optimizer step size
    #[arg(long)]
    pub learning_rate: Option<f32>,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Disable the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let mut config = args.storage.resolve()?;
    if let Some(epochs) = args.epochs {
        config.trainer = config.trainer.with_epochs(epochs);
    }
    if let Some(batch_size) = args.batch_size {
        config.trainer = config.trainer.with_batch_size(batch_size);
    }
    if let Some(learning_rate) = args.learning_rate {
        config.trainer = config.trainer.with_learning_rate(learning_rate);
    }
    if let Some(seed) = args.seed {
        config.trainer = config.trainer.with_seed(seed);
    }
    config.trainer.validate()?;

    let app = App::from_config(&config);
    run_training(&app, !args.no_progress)
}

/// Train and report. An empty move log is reported, not treated as a failure.
pub fn run_training(app: &App, progress: bool) -> Result<()> {
    print_section("Training");

    let mut observers: Vec<Box<dyn TrainingObserver>> = Vec::new();
    if progress {
        observers.push(Box::new(ProgressObserver::new()));
    }

    let saved = match app.train(observers) {
        Ok(saved) => saved,
        Err(Error::EmptyCorpus) => {
            println!("No recorded moves yet: play a game before training.");
            return Ok(());
        }
        Err(err) => return Err(err).context("Training failed"),
    };

    let metadata = &saved.metadata;
    print_kv("Dataset", &format!("{} moves", format_number(metadata.examples)));
    print_kv("Epochs", &metadata.epochs.to_string());
    print_kv("Batch size", &metadata.batch_size.to_string());
    if let Some(loss) = metadata.final_loss {
        print_kv("Final loss", &format!("{loss:.4}"));
    }
    if let Some(accuracy) = metadata.final_accuracy {
        print_kv("Final accuracy", &format!("{:.1}%", accuracy * 100.0));
    }
    print_kv("Saved to", &app.predictor_store().location());
    Ok(())
}
