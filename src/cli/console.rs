//! Console player: reads moves from a line-based input and narrates the game

use std::io::{self, BufRead, Stdout, Write};

use super::output::{outcome_banner, position_guide, render_board};
use crate::{
    Result,
    error::Error,
    ports::Actor,
    session::TurnReport,
    tictactoe::{Board, Mark, Outcome},
};

fn io_error(operation: &str) -> impl FnOnce(io::Error) -> Error + '_ {
    move |source| Error::Io {
        operation: operation.to_string(),
        source,
    }
}

/// Line-oriented console, generic over its streams so tests can script it
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl Console<io::StdinLock<'static>, Stdout> {
    /// Console on the process's stdin and stdout
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Print a line
    pub fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{text}").map_err(io_error("write to console"))
    }

    /// Show `prompt` and read one trimmed line; `None` at end of input.
    pub fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{prompt}").map_err(io_error("write to console"))?;
        self.output.flush().map_err(io_error("flush console"))?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .map_err(io_error("read console input"))?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Yes/no question; anything but y/yes is no.
    pub fn confirm(&mut self, prompt: &str) -> Result<bool> {
        Ok(self
            .ask(prompt)?
            .is_some_and(|answer| matches!(answer.to_ascii_lowercase().as_str(), "y" | "yes")))
    }
}

impl<R: BufRead, W: Write> Actor for Console<R, W> {
    fn request_move(&mut self, board: &Board) -> Result<Option<usize>> {
        if board.occupied_count() == 0 {
            self.say("You are 'X' and the machine is 'O'. Cells are numbered:")?;
            self.say(&position_guide())?;
            self.say("")?;
        }
        self.say(&render_board(board))?;

        loop {
            let Some(answer) = self.ask("Choose your move (0-8, q to quit): ")? else {
                return Ok(None);
            };
            if answer.eq_ignore_ascii_case("q") {
                return Ok(None);
            }
            match answer.parse::<usize>() {
                Ok(cell) => return Ok(Some(cell)),
                Err(_) => self.say("Please enter a number between 0 and 8.")?,
            }
        }
    }

    fn on_rejected(&mut self, _board: &Board, error: &Error) -> Result<()> {
        self.say(&format!("Invalid move: {error}."))
    }

    fn on_turn(&mut self, report: &TurnReport) -> Result<()> {
        if report.record.mover() == Mark::Opponent {
            let note = if report.substituted {
                " (fallback)"
            } else {
                ""
            };
            self.say(&format!(
                "The machine plays {}{note}.",
                report.record.cell()
            ))?;
        }
        Ok(())
    }

    fn on_game_end(&mut self, board: &Board, outcome: Outcome) -> Result<()> {
        self.say(&render_board(board))?;
        self.say(outcome_banner(outcome))
    }
}
