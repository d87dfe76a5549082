//! Stats command - Summarise the move log and the trained model

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use crate::{
    analysis::CorpusStats,
    app::App,
    cli::{
        config::StorageArgs,
        output::{format_number, print_kv, print_section, print_subsection},
    },
    trainer::TrainingMetadata,
};

#[derive(Parser, Debug)]
#[command(about = "Show what the move log and the trained model contain")]
pub struct StatsArgs {
    #[command(flatten)]
    pub storage: StorageArgs,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct StatsReport {
    corpus: CorpusStats,
    model_location: String,
    model: Option<TrainingMetadata>,
}

pub fn execute(args: StatsArgs) -> Result<()> {
    let app = App::from_config(&args.storage.resolve()?);
    let corpus = app.corpus_stats().context("Failed to read the move log")?;

    let store = app.predictor_store();
    let model = if store.exists() {
        Some(
            store
                .load()
                .context("Failed to read the trained model")?
                .metadata,
        )
    } else {
        None
    };
    let report = StatsReport {
        corpus,
        model_location: store.location(),
        model,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn print_report(report: &StatsReport) {
    let corpus = &report.corpus;
    print_section("Move log");
    print_kv("Records", &format_number(corpus.records));
    print_kv("Games started", &format_number(corpus.games_started));
    print_kv("Games finished", &format_number(corpus.outcomes.total()));
    print_kv("Player moves", &format_number(corpus.player_moves));
    print_kv("Machine moves", &format_number(corpus.opponent_moves));
    print_kv("Player wins", &corpus.outcomes.player_wins.to_string());
    print_kv("Machine wins", &corpus.outcomes.opponent_wins.to_string());
    print_kv("Draws", &corpus.outcomes.draws.to_string());
    if corpus.outcomes.total() > 0 {
        print_kv("Avg game length", &format!("{:.1}", corpus.average_game_length));
    }
    if let Some(cell) = corpus.favourite_opening() {
        print_kv("Favourite opening", &cell.to_string());
    }

    print_subsection("Chosen cells");
    for (cell, count) in corpus.cell_histogram.iter().enumerate() {
        print_kv(&format!("Cell {cell}"), &format_number(*count));
    }

    print_subsection("Trained model");
    match &report.model {
        Some(model) => {
            print_kv("Location", &report.model_location);
            print_kv("Trained on", &format!("{} moves", format_number(model.examples)));
            print_kv("Epochs", &model.epochs.to_string());
            if let Some(accuracy) = model.final_accuracy {
                print_kv("Final accuracy", &format!("{:.1}%", accuracy * 100.0));
            }
        }
        None => print_kv("Location", &format!("{} (not trained yet)", report.model_location)),
    }
}
