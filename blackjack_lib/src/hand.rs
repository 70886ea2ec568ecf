use crate::card::{Card, CardValue};
use crate::shoe::Shoe;
use crate::BlackjackGameError;
use std::fmt::Display;

/// The best total a hand may reach before it busts.
pub const BLACKJACK: u32 = 21;

/// Cards held by a single participant for one round.
#[derive(Debug, Clone, PartialEq)]
pub struct Hand {
    cards: Vec<Card>,
    active: bool,
}

impl Hand {
    /// Deals a fresh, active two card hand from `shoe`.
    pub fn deal_initial(shoe: &mut Shoe) -> Result<Hand, BlackjackGameError> {
        let (first, second) = shoe.deal_two()?;
        Ok(Hand {
            cards: vec![first, second],
            active: true,
        })
    }

    /// Builds an active hand from the given cards, mostly useful for staging known hands.
    pub fn from_cards(cards: Vec<Card>) -> Hand {
        Hand {
            cards,
            active: true,
        }
    }

    /// Adds one card from `shoe` to the hand.
    pub fn draw(&mut self, shoe: &mut Shoe) -> Result<(), BlackjackGameError> {
        let card = shoe.draw_one()?;
        self.cards.push(card);
        Ok(())
    }

    /// Computes the blackjack value of the hand.
    ///
    /// Non-Ace cards are summed first, then each Ace, in hand order, counts as 11 if that keeps the
    /// running total at or under 21 and as 1 otherwise. The resolution is greedy: `[Ace, Ace, 9]`
    /// resolves the first Ace to 11 and the second to 1.
    pub fn value(&self) -> u32 {
        let hard_total: u32 = self
            .cards
            .iter()
            .filter_map(|card| match card.value() {
                CardValue::Hard(v) => Some(v as u32),
                CardValue::Dual(_, _) => None,
            })
            .sum();

        self.cards
            .iter()
            .filter_map(|card| match card.value() {
                CardValue::Dual(high, low) => Some((high as u32, low as u32)),
                CardValue::Hard(_) => None,
            })
            .fold(hard_total, |total, (high, low)| {
                if total + high > BLACKJACK {
                    total + low
                } else {
                    total + high
                }
            })
    }

    /// Whether the hand totals exactly 21. Only meaningful before any card has been drawn past the
    /// initial two, since card count is not checked.
    pub fn is_natural(&self) -> bool {
        self.value() == BLACKJACK
    }

    /// Whether the hand still takes part in the round.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Marks the hand as resolved, it takes no further turns this round.
    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Getter method for the cards in the hand, in the order they were dealt.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Number of cards in the hand.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether the hand holds no cards.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Gives the cards back, e.g. for the shoe's discard area.
    pub fn into_cards(self) -> Vec<Card> {
        self.cards
    }
}

impl Display for Hand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cards: Vec<String> = self.cards.iter().map(|c| c.to_string()).collect();
        write!(f, "[{}]", cards.join(", "))
    }
}
