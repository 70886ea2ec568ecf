use crate::card::{Card, Rank, Suit};
use crate::BlackjackGameError;
use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::VecDeque;

/// The number of cards in a single standard deck.
pub const DECK_SIZE: usize = 52;

/// The working deck for a round. Cards are drawn from the front and, once a round is over,
/// returned to the discard area.
#[derive(Debug, Clone)]
pub struct Shoe {
    cards: VecDeque<Card>,
    discard: Vec<Card>,
}

impl Shoe {
    /// Builds all 52 rank/suit combinations in canonical order, suit by suit. No shuffling is done here.
    pub fn new() -> Shoe {
        let mut cards = VecDeque::with_capacity(DECK_SIZE);
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                cards.push_back(Card::new(rank, suit));
            }
        }
        Shoe {
            cards,
            discard: Vec::new(),
        }
    }

    /// Randomly permutes the cards still in the shoe.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.make_contiguous().shuffle(rng);
        debug!("shuffled shoe with {} cards remaining", self.cards.len());
    }

    /// Removes the next two cards from the shoe in draw order. Nothing is removed if fewer than two remain.
    pub fn deal_two(&mut self) -> Result<(Card, Card), BlackjackGameError> {
        self.ensure_remaining(2)?;
        let first = self.draw_one()?;
        let second = self.draw_one()?;
        Ok((first, second))
    }

    /// Removes the next card from the shoe.
    pub fn draw_one(&mut self) -> Result<Card, BlackjackGameError> {
        self.cards
            .pop_front()
            .ok_or(BlackjackGameError::ShoeExhausted {
                requested: 1,
                remaining: 0,
            })
    }

    /// Places finished cards into the discard area.
    pub fn discard<I: IntoIterator<Item = Card>>(&mut self, cards: I) {
        self.discard.extend(cards);
    }

    /// Getter method for the cards in the discard area.
    pub fn discarded(&self) -> &[Card] {
        &self.discard
    }

    /// Number of cards left to draw.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether every card has been drawn.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterates over the undrawn cards in draw order.
    pub fn remaining(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    fn ensure_remaining(&self, requested: usize) -> Result<(), BlackjackGameError> {
        if self.cards.len() < requested {
            return Err(BlackjackGameError::ShoeExhausted {
                requested,
                remaining: self.cards.len(),
            });
        }
        Ok(())
    }
}

impl Default for Shoe {
    fn default() -> Self {
        Shoe::new()
    }
}
