//! triki - tic-tac-toe against a predictor trained on your own games
//!
//! Without a subcommand the interactive menu starts:
//! - play against the machine (every move is recorded)
//! - retrain the machine on all recorded moves
//! - quit

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Used when `RUST_LOG` is unset. Library events stay off the console game.
const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Parser)]
#[command(name = "triki")]
#[command(version, about = "Tic-tac-toe against a machine that learns from your games", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play against the machine
    Play(triki::cli::commands::play::PlayArgs),

    /// Retrain the machine on every recorded move
    Train(triki::cli::commands::train::TrainArgs),

    /// Summarise recorded moves and the trained model
    Stats(triki::cli::commands::stats::StatsArgs),

    /// Interactive play / train / quit menu (the default)
    Menu(triki::cli::commands::menu::MenuArgs),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Play(args)) => triki::cli::commands::play::execute(args),
        Some(Commands::Train(args)) => triki::cli::commands::train::execute(args),
        Some(Commands::Stats(args)) => triki::cli::commands::stats::execute(args),
        Some(Commands::Menu(args)) => triki::cli::commands::menu::execute(args),
        None => triki::cli::commands::menu::execute(triki::cli::commands::menu::MenuArgs {
            storage: Default::default(),
        }),
    }
}
