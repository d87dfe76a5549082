//! Play command - Interactive games against the machine

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    app::App,
    cli::{config::StorageArgs, console::Console},
};

#[derive(Parser, Debug)]
#[command(about = "Play tic-tac-toe against the machine")]
pub struct PlayArgs {
    #[command(flatten)]
    pub storage: StorageArgs,
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let app = App::from_config(&args.storage.resolve()?);
    let mut console = Console::stdio();
    play_games(&app, &mut console)
}

/// Play games until the player declines another one or input ends.
///
/// The predictor is loaded once per call; a retrain elsewhere is picked up on
/// the next call.
pub fn play_games<R: BufRead, W: Write>(app: &App, console: &mut Console<R, W>) -> Result<()> {
    let mut session = app.new_session().context("Failed to start a game")?;
    if session.predictor_name() == "fallback" {
        console.say("No trained model found: the machine plays the first free cell.")?;
    } else {
        console.say("Loaded the trained model.")?;
    }

    loop {
        if session.run(&mut *console)?.is_none() {
            break;
        }
        if !console.confirm("Play again? [y/N] ")? {
            break;
        }
        session.reset();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::adapters::InMemoryMoveLog;

    #[test]
    fn test_two_games_share_the_log() {
        let log = InMemoryMoveLog::new();
        let app = App::for_testing().with_move_log(log.clone()).build();
        // Game 1: win on the diagonal; game 2: quit after one move
        let script = "4\n2\n6\ny\n8\nq\n";
        let mut console = Console::new(Cursor::new(script.as_bytes().to_vec()), Vec::new());

        play_games(&app, &mut console).unwrap();
        assert_eq!(log.len(), 5 + 2);

        let output = String::from_utf8(console.into_output()).unwrap();
        assert!(output.contains("No trained model found"));
    }
}
