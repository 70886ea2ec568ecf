use thiserror::Error;

/// Errors raised by the blackjack core. Bet range errors are meant to be re-prompted by the caller,
/// the rest are precondition violations and should abort the round.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BlackjackGameError {
    #[error("the shoe cannot deal {requested} card(s), only {remaining} remain")]
    ShoeExhausted { requested: usize, remaining: usize },

    #[error("bet of {bet} is below the table minimum of {min_bet}")]
    BetBelowMinimum { bet: u32, min_bet: u32 },

    #[error("bet of {bet} is above the table maximum of {max_bet}")]
    BetAboveMaximum { bet: u32, max_bet: u32 },

    #[error("bet of {bet} exceeds the {chips} chips on hand")]
    InsufficientChips { bet: u32, chips: f32 },

    #[error("{0} has already placed a bet this round")]
    BetAlreadyPlaced(String),

    #[error("{0} has no hand to settle")]
    MissingHand(String),

    #[error("no round is in progress")]
    RoundNotInProgress,

    #[error("a round is already in progress")]
    RoundAlreadyInProgress,

    #[error("no human player is seated at the table")]
    NoHumanPlayer,

    #[error("invalid table configuration: {0}")]
    InvalidConfig(String),
}
