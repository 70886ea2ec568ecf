use crate::participant::BetLimits;
use crate::shoe::DECK_SIZE;
use crate::BlackjackGameError;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Most automated opponents a single deck can deal into, with two cards each for them,
/// the human player and the dealer.
pub const MAX_OPPONENTS: usize = DECK_SIZE / 2 - 2;

/// Struct for configuring a single `Table`
#[derive(Debug, Clone, PartialEq)]
pub struct TableConfig {
    pub title: String,
    pub num_opponents: usize,
    pub min_bet: u32,
    pub max_bet: u32,
    pub starting_chips: f32,
    pub seed: Option<u64>,
}

impl TableConfig {
    /// Associated method for returning a new `TableConfigBuilder` object. Allows customization of the table
    /// i.e. the title, the number of automated opponents, the betting limits and how many chips each player starts with.
    pub fn new() -> TableConfigBuilder {
        TableConfigBuilder::default()
    }

    /// The betting limits of the configured table.
    pub fn limits(&self) -> BetLimits {
        BetLimits::new(self.min_bet, self.max_bet)
    }

    /// Method for building the random source of the table. A configured seed makes shuffles,
    /// seating and automated bets reproducible, otherwise the generator is seeded from entropy.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Checks that the configured limits describe a usable table.
    pub fn validate(&self) -> Result<(), BlackjackGameError> {
        if self.min_bet == 0 {
            return Err(BlackjackGameError::InvalidConfig(
                "minimum bet must be positive".to_string(),
            ));
        }
        if self.min_bet > self.max_bet {
            return Err(BlackjackGameError::InvalidConfig(format!(
                "minimum bet {} is above maximum bet {}",
                self.min_bet, self.max_bet
            )));
        }
        if !self.starting_chips.is_finite() || self.starting_chips < 0.0 {
            return Err(BlackjackGameError::InvalidConfig(
                "starting chips must be a non-negative amount".to_string(),
            ));
        }
        if self.starting_chips < self.min_bet as f32 {
            return Err(BlackjackGameError::InvalidConfig(format!(
                "starting chips {} cannot cover the minimum bet {}",
                self.starting_chips, self.min_bet
            )));
        }
        if self.num_opponents > MAX_OPPONENTS {
            return Err(BlackjackGameError::InvalidConfig(format!(
                "{} opponents is more than one shoe can deal, the limit is {}",
                self.num_opponents, MAX_OPPONENTS
            )));
        }
        Ok(())
    }
}

impl Default for TableConfig {
    /// Returns the standard configuration for a table.
    fn default() -> Self {
        TableConfig::new().build()
    }
}

/// Struct to implement builder pattern for `TableConfig`
#[derive(Debug, Clone, Default)]
pub struct TableConfigBuilder {
    title: Option<String>,
    num_opponents: Option<usize>,
    min_bet: Option<u32>,
    max_bet: Option<u32>,
    starting_chips: Option<f32>,
    seed: Option<u64>,
}

impl TableConfigBuilder {
    /// Method for setting the title of the game.
    pub fn title<S: Into<String>>(&mut self, title: S) -> &mut Self {
        self.title = Some(title.into());
        self
    }

    /// Method for setting the number of automated opponents seated with the user.
    pub fn num_opponents(&mut self, n: usize) -> &mut Self {
        self.num_opponents = Some(n);
        self
    }

    /// Method for setting the minimum bet for the game
    pub fn min_bet(&mut self, bet: u32) -> &mut Self {
        self.min_bet = Some(bet);
        self
    }

    /// Method for setting the maximum bet for the game
    pub fn max_bet(&mut self, bet: u32) -> &mut Self {
        self.max_bet = Some(bet);
        self
    }

    /// Method for changing how many chips every player sits down with.
    pub fn starting_chips(&mut self, chips: f32) -> &mut Self {
        self.starting_chips = Some(chips);
        self
    }

    /// Method for fixing the random seed, making shuffles, seating and automated bets reproducible.
    pub fn seed(&mut self, seed: u64) -> &mut Self {
        self.seed = Some(seed);
        self
    }

    /// Method for building a `TableConfig` object from the given `TableConfigBuilder` object.
    pub fn build(&mut self) -> TableConfig {
        TableConfig {
            title: self.title.clone().unwrap_or_else(|| "Blackjack".to_string()),
            num_opponents: self.num_opponents.unwrap_or(0),
            min_bet: self.min_bet.unwrap_or(2),
            max_bet: self.max_bet.unwrap_or(500),
            starting_chips: self.starting_chips.unwrap_or(50.0),
            seed: self.seed,
        }
    }
}
