use crate::hand::Hand;
use crate::BlackjackGameError;
use std::fmt::Display;

/// Who controls a seat at the table. The dealer never bets, it only triggers settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Human,
    Automated,
    Dealer,
}

/// Inclusive bet range enforced by the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BetLimits {
    pub min_bet: u32,
    pub max_bet: u32,
}

impl BetLimits {
    /// Associated function to create new `BetLimits`, both bounds inclusive.
    pub fn new(min_bet: u32, max_bet: u32) -> BetLimits {
        BetLimits { min_bet, max_bet }
    }
}

/// A seat at the table: a player or the dealer.
#[derive(Debug, Clone)]
pub struct Participant {
    name: String,
    role: Role,
    pub chips: f32,
    pub bet: u32,
    pub hand: Option<Hand>,
    pub sitting_out: bool,
}

impl Participant {
    /// Associated function to create a new `Participant` with no bet and no hand.
    pub fn new<S: Into<String>>(name: S, role: Role, chips: f32) -> Participant {
        Participant {
            name: name.into(),
            role,
            chips,
            bet: 0,
            hand: None,
            sitting_out: false,
        }
    }

    /// Associated function to create the dealer, who holds no chips.
    pub fn dealer() -> Participant {
        Participant::new("Dealer", Role::Dealer, 0.0)
    }

    /// Getter method for the participant's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Getter method for the participant's role at the table.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Whether the participant is the human player.
    pub fn is_human(&self) -> bool {
        self.role == Role::Human
    }

    /// Whether the participant is an automated opponent.
    pub fn is_automated(&self) -> bool {
        self.role == Role::Automated
    }

    /// Whether the participant has enough chips to cover `min_bet`.
    pub fn can_cover(&self, min_bet: u32) -> bool {
        self.chips >= min_bet as f32
    }

    /// Moves `amount` chips from the balance into the current bet. The bet is refused, leaving the
    /// balance untouched, when it falls outside `limits`, exceeds the chips on hand, or a bet is already out.
    pub fn place_bet(&mut self, amount: u32, limits: BetLimits) -> Result<(), BlackjackGameError> {
        if self.bet > 0 {
            return Err(BlackjackGameError::BetAlreadyPlaced(self.name.clone()));
        }
        if amount < limits.min_bet {
            return Err(BlackjackGameError::BetBelowMinimum {
                bet: amount,
                min_bet: limits.min_bet,
            });
        }
        if amount > limits.max_bet {
            return Err(BlackjackGameError::BetAboveMaximum {
                bet: amount,
                max_bet: limits.max_bet,
            });
        }
        if amount as f32 > self.chips {
            return Err(BlackjackGameError::InsufficientChips {
                bet: amount,
                chips: self.chips,
            });
        }

        self.chips -= amount as f32;
        self.bet = amount;
        Ok(())
    }

    /// Takes the hand away, returning it if one was dealt.
    pub fn clear_hand(&mut self) -> Option<Hand> {
        self.hand.take()
    }
}

impl Display for Participant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
