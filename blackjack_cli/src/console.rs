use crate::CliError;
use blackjack_lib::{Settlement, Table};
use serde::Serialize;
use std::io::{BufRead, Write};
use std::time::Duration;

/// Prompts and table output over any reader/writer pair.
pub struct Console<R: BufRead, W: Write> {
    input: R,
    output: W,
    delay: Option<Duration>,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W, delay: Option<Duration>) -> Console<R, W> {
        Console {
            input,
            output,
            delay,
        }
    }

    pub fn say<S: AsRef<str>>(&mut self, message: S) -> Result<(), CliError> {
        writeln!(self.output, "{}", message.as_ref())?;
        Ok(())
    }

    /// Pauses for effect, unless delays are turned off.
    pub fn pause(&mut self) -> Result<(), CliError> {
        self.output.flush()?;
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }
        Ok(())
    }

    /// Writes `prompt` and reads one trimmed line. A closed input is an error.
    pub fn ask(&mut self, prompt: &str) -> Result<String, CliError> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(CliError::InputClosed);
        }
        Ok(line.trim().to_string())
    }

    /// Asks until the answer parses as a `T`.
    pub fn ask_parsed<T: std::str::FromStr>(&mut self, prompt: &str) -> Result<T, CliError> {
        loop {
            let answer = self.ask(prompt)?;
            match answer.parse::<T>() {
                Ok(value) => return Ok(value),
                Err(_) => self.say(format!("'{}' is not a valid answer.", answer))?,
            }
        }
    }

    /// Asks a yes/no question, a closed input counts as no.
    pub fn confirm(&mut self, prompt: &str) -> Result<bool, CliError> {
        match self.ask(prompt) {
            Ok(answer) => Ok(answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")),
            Err(CliError::InputClosed) => Ok(false),
            Err(e) => Err(e),
        }
    }

    pub fn list_opponents(&mut self, table: &Table) -> Result<(), CliError> {
        let names: Vec<String> = table.opponents().map(|p| p.name().to_string()).collect();
        for name in names {
            self.say(name)?;
        }
        Ok(())
    }

    pub fn show_chips(&mut self, table: &Table) -> Result<(), CliError> {
        self.say("Player chips:")?;
        for player in table.participants() {
            writeln!(self.output, "{} - Chips: {}", player.name(), player.chips)?;
        }
        Ok(())
    }

    /// Shows every hand and bet, with the dealer's second card face down.
    pub fn show_hands(&mut self, table: &Table) -> Result<(), CliError> {
        self.say("Dealer hand:")?;
        match table.dealer_up_card() {
            Some(card) => writeln!(self.output, "[{}, ?]", card)?,
            None => writeln!(self.output, "[]")?,
        }
        self.say("Hands and bets:")?;
        for player in table.participants() {
            match &player.hand {
                Some(hand) => writeln!(self.output, "{}: {} - Bet: {}", player.name(), hand, player.bet)?,
                None => writeln!(self.output, "{}: sitting out", player.name())?,
            }
        }
        Ok(())
    }

    pub fn announce(&mut self, settlements: &[Settlement]) -> Result<(), CliError> {
        for settlement in settlements {
            let message = match settlement {
                Settlement::Push { name, bet } => format!(
                    "The dealer and {} have a natural blackjack. {} is returned their bet of {}.",
                    name, name, bet
                ),
                Settlement::Natural { name, payout } => format!(
                    "{} has a natural blackjack. They are paid out {} chips.",
                    name, payout
                ),
                Settlement::Forfeit { name, bet } => {
                    format!("{} forfeits their bet of {}.", name, bet)
                }
            };
            self.say(message)?;
        }
        Ok(())
    }

    /// Writes the final chip tally as a single JSON document.
    pub fn write_json_tally(&mut self, table: &Table) -> Result<(), CliError> {
        let tally = ChipTally::from(table);
        serde_json::to_writer_pretty(&mut self.output, &tally)?;
        writeln!(self.output)?;
        Ok(())
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

/// Final chip counts of everyone still seated.
#[derive(Debug, Serialize)]
pub struct ChipTally {
    pub title: String,
    pub players: Vec<PlayerChips>,
}

#[derive(Debug, Serialize)]
pub struct PlayerChips {
    pub name: String,
    pub cpu: bool,
    pub chips: f32,
}

impl From<&Table> for ChipTally {
    fn from(table: &Table) -> Self {
        ChipTally {
            title: table.title().to_string(),
            players: table
                .participants()
                .iter()
                .map(|p| PlayerChips {
                    name: p.name().to_string(),
                    cpu: p.is_automated(),
                    chips: p.chips,
                })
                .collect(),
        }
    }
}
