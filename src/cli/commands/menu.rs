//! Menu command - The interactive play / train / quit loop

use std::io::{BufRead, Write};

use anyhow::Result;
use clap::Parser;

use super::{play::play_games, train::run_training};
use crate::{
    app::App,
    cli::{config::StorageArgs, console::Console},
};

#[derive(Parser, Debug)]
#[command(about = "Interactive menu: play, train or quit")]
pub struct MenuArgs {
    #[command(flatten)]
    pub storage: StorageArgs,
}

pub fn execute(args: MenuArgs) -> Result<()> {
    let app = App::from_config(&args.storage.resolve()?);
    let mut console = Console::stdio();
    run_menu(&app, &mut console, true)
}

/// Show the menu until the user quits or input ends.
pub fn run_menu<R: BufRead, W: Write>(
    app: &App,
    console: &mut Console<R, W>,
    progress: bool,
) -> Result<()> {
    loop {
        console.say("")?;
        console.say("1. Play against the machine")?;
        console.say("2. Train the model on recorded moves")?;
        console.say("3. Quit")?;

        match console.ask("Choose an option: ")?.as_deref() {
            Some("1") => play_games(app, console)?,
            Some("2") => run_training(app, progress)?,
            Some("3") | None => {
                console.say("Goodbye!")?;
                return Ok(());
            }
            Some(_) => console.say("Invalid option, try again.")?,
        }
    }
}
