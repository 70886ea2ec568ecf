use crate::CliError;
use blackjack_lib::{TableConfig, TableConfigBuilder};
use clap::Parser;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Command line arguments. Anything not given here falls back to the config file, then to a prompt
/// (title, opponents and name) or to the table defaults.
#[derive(Debug, Parser)]
#[command(name = "blackjack", about = "Play blackjack against the dealer and a table of CPU opponents")]
pub struct Cli {
    /// Title of the game
    #[arg(long)]
    pub title: Option<String>,

    /// Number of CPU opponents at the table
    #[arg(long)]
    pub opponents: Option<usize>,

    /// Your name at the table
    #[arg(long)]
    pub name: Option<String>,

    /// Table minimum bet
    #[arg(long)]
    pub min_bet: Option<u32>,

    /// Table maximum bet
    #[arg(long)]
    pub max_bet: Option<u32>,

    /// Chips every player sits down with
    #[arg(long)]
    pub chips: Option<f32>,

    /// Seed for shuffles, seating and CPU bets
    #[arg(long)]
    pub seed: Option<u64>,

    /// JSON file with table settings
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Skip the dramatic pauses
    #[arg(long)]
    pub no_delay: bool,

    /// Print the final chip tally as JSON
    #[arg(long)]
    pub json: bool,
}

/// Table settings read from a JSON file, every field is optional.
#[derive(Debug, Default, Deserialize, PartialEq)]
pub struct GameConfig {
    pub title: Option<String>,
    pub num_opponents: Option<usize>,
    pub player_name: Option<String>,
    pub min_bet: Option<u32>,
    pub max_bet: Option<u32>,
    pub starting_chips: Option<f32>,
    pub seed: Option<u64>,
}

impl GameConfig {
    pub fn from_json(json: &str) -> Result<GameConfig, CliError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<GameConfig, CliError> {
        let contents = std::fs::read_to_string(path)?;
        GameConfig::from_json(&contents)
    }

    /// Overlays the command line arguments on top of the file settings.
    pub fn merge(self, cli: &Cli) -> GameConfig {
        GameConfig {
            title: cli.title.clone().or(self.title),
            num_opponents: cli.opponents.or(self.num_opponents),
            player_name: cli.name.clone().or(self.player_name),
            min_bet: cli.min_bet.or(self.min_bet),
            max_bet: cli.max_bet.or(self.max_bet),
            starting_chips: cli.chips.or(self.starting_chips),
            seed: cli.seed.or(self.seed),
        }
    }

    /// Builder holding the betting, chip and seed settings. Title and opponents are set once known.
    pub fn table_builder(&self) -> TableConfigBuilder {
        let mut builder = TableConfig::new();
        if let Some(bet) = self.min_bet {
            builder.min_bet(bet);
        }
        if let Some(bet) = self.max_bet {
            builder.max_bet(bet);
        }
        if let Some(chips) = self.starting_chips {
            builder.starting_chips(chips);
        }
        if let Some(seed) = self.seed {
            builder.seed(seed);
        }
        builder
    }
}
