use std::fmt::Display;

/// The four suits of a standard deck. Suits are cosmetic and never affect scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Suit {
    Spades,
    Clubs,
    Diamonds,
    Hearts,
}

impl Suit {
    /// Suits in the order a fresh shoe is built.
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Clubs, Suit::Diamonds, Suit::Hearts];
}

impl Display for Suit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Suit::Spades => "Spades",
            Suit::Clubs => "Clubs",
            Suit::Diamonds => "Diamonds",
            Suit::Hearts => "Hearts",
        };
        write!(f, "{}", name)
    }
}

/// The thirteen ranks of a standard deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rank {
    Ace,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
}

impl Rank {
    /// Ranks in the order a fresh shoe is built.
    pub const ALL: [Rank; 13] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ];

    /// The scoring value of the rank. Numeric ranks score their face value, face cards score 10
    /// and an Ace scores either 11 or 1 depending on the rest of the hand.
    pub fn value(&self) -> CardValue {
        match self {
            Rank::Ace => CardValue::Dual(11, 1),
            Rank::Two => CardValue::Hard(2),
            Rank::Three => CardValue::Hard(3),
            Rank::Four => CardValue::Hard(4),
            Rank::Five => CardValue::Hard(5),
            Rank::Six => CardValue::Hard(6),
            Rank::Seven => CardValue::Hard(7),
            Rank::Eight => CardValue::Hard(8),
            Rank::Nine => CardValue::Hard(9),
            Rank::Ten | Rank::Jack | Rank::Queen | Rank::King => CardValue::Hard(10),
        }
    }
}

impl Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rank::Ace => write!(f, "Ace"),
            Rank::Jack => write!(f, "Jack"),
            Rank::Queen => write!(f, "Queen"),
            Rank::King => write!(f, "King"),
            numeric => match numeric.value() {
                CardValue::Hard(v) => write!(f, "{}", v),
                CardValue::Dual(high, _) => write!(f, "{}", high),
            },
        }
    }
}

/// Scoring value of a single card. `Dual` holds the preferred (high) value first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardValue {
    Hard(u8),
    Dual(u8, u8),
}

/// An immutable playing card.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Card {
    rank: Rank,
    suit: Suit,
}

impl Card {
    /// Associated function to create a new `Card` from its rank and suit.
    pub fn new(rank: Rank, suit: Suit) -> Card {
        Card { rank, suit }
    }

    /// Getter method for the rank of the card.
    pub fn rank(&self) -> Rank {
        self.rank
    }

    /// Getter method for the suit of the card.
    pub fn suit(&self) -> Suit {
        self.suit
    }

    /// Method for the scoring value of the card, see `Rank::value`.
    pub fn value(&self) -> CardValue {
        self.rank.value()
    }

    /// Whether the card is an Ace.
    pub fn is_ace(&self) -> bool {
        self.rank == Rank::Ace
    }
}

impl Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} of {}", self.rank, self.suit)
    }
}
