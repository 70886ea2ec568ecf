mod config;
mod console;
mod game;

use blackjack_lib::BlackjackGameError;
use clap::Parser;
use config::{Cli, GameConfig};
use console::Console;
use log::debug;
use std::io::{self, BufWriter, Write};
use std::time::Duration;
use thiserror::Error;

/// Errors that end the console game.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Game(#[from] BlackjackGameError),

    #[error("invalid JSON: {0}")]
    Config(#[from] serde_json::Error),

    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    #[error("input closed before the game could continue")]
    InputClosed,
}

fn run(cli: Cli) -> Result<(), CliError> {
    let file_settings = match &cli.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    let settings = file_settings.merge(&cli);
    debug!("starting game with settings {:?}", settings);

    let mut rng = settings.table_builder().build().rng();
    let delay = if cli.no_delay {
        None
    } else {
        Some(Duration::from_secs(1))
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut console = Console::new(stdin.lock(), BufWriter::new(stdout.lock()), delay);

    let table = game::play(&settings, &mut console, &mut rng)?;
    if cli.json {
        console.write_json_tally(&table)?;
    }
    console.into_output().flush()?;
    Ok(())
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
