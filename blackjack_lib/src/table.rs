use crate::card::Card;
use crate::config::{TableConfig, MAX_OPPONENTS};
use crate::hand::Hand;
use crate::participant::{BetLimits, Participant, Role};
use crate::round::{self, NaturalsReport, RoundState, Settlement};
use crate::shoe::Shoe;
use crate::BlackjackGameError;
use log::{debug, warn};
use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt::Display;

/// A single blackjack table: the seated participants, the dealer and the betting limits.
/// Participants persist across rounds, hands only live for one round.
#[derive(Debug, Clone)]
pub struct Table {
    title: String,
    num_opponents: usize,
    limits: BetLimits,
    starting_chips: f32,
    participants: Vec<Participant>,
    dealer: Participant,
    round: Option<RoundState>,
    report: NaturalsReport,
}

impl Table {
    /// Creates an empty table and its dealer from `config`.
    pub fn new(config: &TableConfig) -> Result<Table, BlackjackGameError> {
        config.validate()?;
        Ok(Table {
            title: config.title.clone(),
            num_opponents: config.num_opponents,
            limits: config.limits(),
            starting_chips: config.starting_chips,
            participants: Vec::new(),
            dealer: Participant::dealer(),
            round: None,
            report: NaturalsReport::default(),
        })
    }

    /// Seats the human player `name` and `opponent_count` automated opponents, then randomizes seat order.
    /// Fails without seating anyone if one shoe cannot deal to that many participants.
    pub fn create_participants<R: Rng + ?Sized>(
        &mut self,
        name: &str,
        opponent_count: usize,
        rng: &mut R,
    ) -> Result<(), BlackjackGameError> {
        if opponent_count > MAX_OPPONENTS {
            return Err(BlackjackGameError::InvalidConfig(format!(
                "{} opponents is more than one shoe can deal, the limit is {}",
                opponent_count, MAX_OPPONENTS
            )));
        }
        self.num_opponents = opponent_count;
        self.participants = (1..=opponent_count)
            .map(|i| Participant::new(format!("CPU{}", i), Role::Automated, self.starting_chips))
            .collect();
        self.participants
            .push(Participant::new(name, Role::Human, self.starting_chips));
        self.participants.shuffle(rng);
        debug!(
            "seated {} participants at {}: {:?}",
            self.participants.len(),
            self.title,
            self.participants.iter().map(|p| p.name()).collect::<Vec<_>>()
        );
        Ok(())
    }

    /// Getter method for the title of the game.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Getter method for the number of automated opponents the table was set up with.
    pub fn num_opponents(&self) -> usize {
        self.num_opponents
    }

    /// Getter method for the betting limits of the table.
    pub fn limits(&self) -> BetLimits {
        self.limits
    }

    /// Participants in seat order, the dealer excluded.
    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    /// The automated participants, in seat order.
    pub fn opponents(&self) -> impl Iterator<Item = &Participant> {
        self.participants.iter().filter(|p| p.is_automated())
    }

    /// Getter method for the human player, if one is seated.
    pub fn user(&self) -> Option<&Participant> {
        self.participants.iter().find(|p| p.is_human())
    }

    /// Mutable access to the human player, if one is seated.
    pub fn user_mut(&mut self) -> Option<&mut Participant> {
        self.participants.iter_mut().find(|p| p.is_human())
    }

    /// Getter method for the dealer.
    pub fn dealer(&self) -> &Participant {
        &self.dealer
    }

    /// The dealer's face up card, the first one dealt.
    pub fn dealer_up_card(&self) -> Option<&Card> {
        self.dealer.hand.as_ref().and_then(|h| h.cards().first())
    }

    /// Getter method for the state of the current round, `None` between rounds.
    pub fn round_state(&self) -> Option<RoundState> {
        self.round
    }

    /// Places the human player's bet, refusing amounts outside the table limits or above their chips.
    pub fn place_user_bet(&mut self, amount: u32) -> Result<(), BlackjackGameError> {
        self.ensure_between_rounds()?;
        let limits = self.limits;
        let user = self.user_mut().ok_or(BlackjackGameError::NoHumanPlayer)?;
        user.place_bet(amount, limits)?;
        debug!("{} bets {}", user.name(), amount);
        Ok(())
    }

    /// Places a uniformly random bet for every automated participant. A participant whose chips
    /// cannot cover the minimum bet sits out the round instead.
    pub fn place_cpu_bets<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), BlackjackGameError> {
        self.ensure_between_rounds()?;
        let limits = self.limits;
        for player in self.participants.iter_mut().filter(|p| p.is_automated()) {
            if !player.can_cover(limits.min_bet) {
                warn!(
                    "{} has {} chips and cannot cover the minimum bet of {}, sitting out",
                    player.name(),
                    player.chips,
                    limits.min_bet
                );
                player.sitting_out = true;
                continue;
            }
            let upper = u32::min(limits.max_bet, player.chips.floor() as u32);
            let amount = rng.gen_range(limits.min_bet..=upper);
            player.place_bet(amount, limits)?;
            debug!("{} bets {}", player.name(), amount);
        }
        Ok(())
    }

    /// Deals an initial two card hand to every participant in the round, then to the dealer.
    /// If the shoe cannot cover every hand nothing is dealt and the table is left unchanged.
    pub fn deal_round(&mut self, shoe: &mut Shoe) -> Result<(), BlackjackGameError> {
        self.ensure_between_rounds()?;
        let seats = self.participants.iter().filter(|p| !p.sitting_out).count() + 1;
        if shoe.len() < 2 * seats {
            return Err(BlackjackGameError::ShoeExhausted {
                requested: 2 * seats,
                remaining: shoe.len(),
            });
        }
        for player in self.participants.iter_mut().filter(|p| !p.sitting_out) {
            player.hand = Some(Hand::deal_initial(shoe)?);
        }
        self.dealer.hand = Some(Hand::deal_initial(shoe)?);
        self.round = Some(RoundState::InProgress);
        debug!("dealt round, {} cards left in the shoe", shoe.len());
        Ok(())
    }

    /// Settles natural blackjacks from the initial deal. Returns `true` when the dealer holds a natural
    /// and the round must end immediately, `false` when turn play should proceed.
    pub fn check_naturals(&mut self) -> Result<bool, BlackjackGameError> {
        if self.round != Some(RoundState::InProgress) {
            return Err(BlackjackGameError::RoundNotInProgress);
        }
        self.report = round::check_naturals(&self.dealer, &mut self.participants)?;
        self.round = Some(RoundState::Settled);
        Ok(self.report.round_over())
    }

    /// Settlements made by the last call to `check_naturals`.
    pub fn settlements(&self) -> &[Settlement] {
        &self.report.settlements
    }

    /// Collects every bet still outstanding after settlement. There is no turn phase to decide these
    /// hands, so the bets stay with the house. Only valid once `check_naturals` has settled the round.
    pub fn forfeit_unsettled_bets(&mut self) -> Result<Vec<Settlement>, BlackjackGameError> {
        if self.round != Some(RoundState::Settled) {
            return Err(BlackjackGameError::RoundNotInProgress);
        }
        let mut forfeits = Vec::new();
        for player in self.participants.iter_mut().filter(|p| p.bet > 0) {
            warn!("{} forfeits an unsettled bet of {}", player.name(), player.bet);
            forfeits.push(Settlement::Forfeit {
                name: player.name().to_string(),
                bet: player.bet,
            });
            player.bet = 0;
        }
        Ok(forfeits)
    }

    /// Clears every hand, the dealer's included, and returns the cards so they can be discarded.
    /// Bets are not touched here.
    pub fn end_round(&mut self) -> Vec<Card> {
        let mut cards = Vec::new();
        for player in self.participants.iter_mut() {
            player.sitting_out = false;
            if let Some(hand) = player.clear_hand() {
                cards.extend(hand.into_cards());
            }
        }
        if let Some(hand) = self.dealer.clear_hand() {
            cards.extend(hand.into_cards());
        }
        self.round = None;
        debug!("round over, collected {} cards", cards.len());
        cards
    }

    /// Removes automated participants that can no longer cover the minimum bet, returning their names.
    pub fn remove_broke_opponents(&mut self) -> Vec<String> {
        let min_bet = self.limits.min_bet;
        let (broke, seated): (Vec<Participant>, Vec<Participant>) = self
            .participants
            .drain(..)
            .partition(|p| p.is_automated() && !p.can_cover(min_bet));
        self.participants = seated;
        broke
            .into_iter()
            .map(|p| {
                warn!("{} is out of chips and leaves the table", p.name());
                p.name().to_string()
            })
            .collect()
    }

    /// Whether the human player can no longer cover the minimum bet.
    pub fn user_is_broke(&self) -> bool {
        self.user()
            .map_or(false, |u| !u.can_cover(self.limits.min_bet))
    }

    fn ensure_between_rounds(&self) -> Result<(), BlackjackGameError> {
        match self.round {
            None => Ok(()),
            Some(_) => Err(BlackjackGameError::RoundAlreadyInProgress),
        }
    }
}

impl Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{Rank, Suit};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn table_with(opponents: usize, seed: u64) -> (Table, StdRng) {
        let config = TableConfig::new().title("Test Table").build();
        let mut table = Table::new(&config).unwrap();
        let mut rng = StdRng::seed_from_u64(seed);
        table.create_participants("Ada", opponents, &mut rng).unwrap();
        (table, rng)
    }

    fn card(rank: Rank) -> Card {
        Card::new(rank, Suit::Diamonds)
    }

    #[test]
    fn create_participants_seats_everyone() {
        let (table, _) = table_with(3, 1);
        assert_eq!(table.participants().len(), 4);
        assert_eq!(table.opponents().count(), 3);
        assert_eq!(table.num_opponents(), 3);
        let user = table.user().unwrap();
        assert_eq!(user.name(), "Ada");
        assert_eq!(user.chips, 50.0);
        assert_eq!(table.dealer().role(), Role::Dealer);
        assert_eq!(table.to_string(), "Test Table");
    }

    #[test]
    fn too_many_opponents_for_one_shoe() {
        let (mut table, mut rng) = table_with(2, 1);
        assert!(matches!(
            table.create_participants("Ada", MAX_OPPONENTS + 1, &mut rng),
            Err(BlackjackGameError::InvalidConfig(_))
        ));
        assert_eq!(table.participants().len(), 3);
        assert_eq!(table.num_opponents(), 2);

        table.create_participants("Ada", MAX_OPPONENTS, &mut rng).unwrap();
        let mut shoe = Shoe::new();
        table.deal_round(&mut shoe).unwrap();
        assert!(shoe.is_empty());
    }

    #[test]
    fn seat_order_follows_seed() {
        let (table_a, _) = table_with(5, 11);
        let (table_b, _) = table_with(5, 11);
        let names_a: Vec<&str> = table_a.participants().iter().map(|p| p.name()).collect();
        let names_b: Vec<&str> = table_b.participants().iter().map(|p| p.name()).collect();
        assert_eq!(names_a, names_b);
    }

    #[test]
    fn cpu_bets_stay_within_limits() {
        let (mut table, mut rng) = table_with(4, 5);
        table.place_cpu_bets(&mut rng).unwrap();
        for cpu in table.opponents() {
            assert!(cpu.bet >= 2 && cpu.bet <= 50);
            assert_eq!(cpu.chips, 50.0 - cpu.bet as f32);
        }
        assert_eq!(table.user().unwrap().bet, 0);
    }

    #[test]
    fn cpu_without_enough_chips_sits_out() {
        let (mut table, mut rng) = table_with(1, 2);
        for p in table.participants.iter_mut().filter(|p| p.is_automated()) {
            p.chips = 1.0;
        }
        table.place_cpu_bets(&mut rng).unwrap();
        table.place_user_bet(10).unwrap();

        let mut shoe = Shoe::new();
        table.deal_round(&mut shoe).unwrap();
        let cpu = table.opponents().next().unwrap();
        assert!(cpu.sitting_out);
        assert!(cpu.hand.is_none());
        assert_eq!(shoe.len(), 48);
        assert!(table.check_naturals().is_ok());

        table.end_round();
        assert!(table.opponents().all(|p| !p.sitting_out));
    }

    #[test]
    fn user_bet_is_validated() {
        let (mut table, _) = table_with(0, 3);
        assert!(matches!(
            table.place_user_bet(1),
            Err(BlackjackGameError::BetBelowMinimum { .. })
        ));
        assert!(matches!(
            table.place_user_bet(60),
            Err(BlackjackGameError::InsufficientChips { .. })
        ));
        table.place_user_bet(20).unwrap();
        assert_eq!(table.user().unwrap().chips, 30.0);
    }

    #[test]
    fn user_bet_requires_a_human() {
        let mut table = Table::new(&TableConfig::default()).unwrap();
        assert_eq!(table.place_user_bet(5), Err(BlackjackGameError::NoHumanPlayer));
    }

    #[test]
    fn deal_round_gives_everyone_two_cards() {
        let (mut table, mut rng) = table_with(2, 9);
        let mut shoe = Shoe::new();
        shoe.shuffle(&mut rng);
        table.deal_round(&mut shoe).unwrap();

        assert!(table.participants().iter().all(|p| p.hand.as_ref().unwrap().len() == 2));
        assert_eq!(table.dealer().hand.as_ref().unwrap().len(), 2);
        assert!(table.dealer_up_card().is_some());
        assert_eq!(shoe.len(), 52 - 8);
        assert_eq!(table.round_state(), Some(RoundState::InProgress));
        assert_eq!(
            table.deal_round(&mut shoe),
            Err(BlackjackGameError::RoundAlreadyInProgress)
        );
    }

    #[test]
    fn short_shoe_deals_nothing() {
        let (mut table, _) = table_with(3, 9);
        let mut shoe = Shoe::new();
        while shoe.len() > 7 {
            shoe.draw_one().unwrap();
        }
        assert_eq!(
            table.deal_round(&mut shoe),
            Err(BlackjackGameError::ShoeExhausted {
                requested: 10,
                remaining: 7
            })
        );
        assert_eq!(shoe.len(), 7);
        assert!(table.participants().iter().all(|p| p.hand.is_none()));
        assert!(table.dealer().hand.is_none());
        assert_eq!(table.round_state(), None);
    }

    #[test]
    fn user_mut_reaches_the_human() {
        let (mut table, _) = table_with(2, 3);
        table.user_mut().unwrap().chips = 7.5;
        assert_eq!(table.user().unwrap().chips, 7.5);
        assert!(table.opponents().all(|p| p.chips == 50.0));

        let mut empty = Table::new(&TableConfig::default()).unwrap();
        assert!(empty.user_mut().is_none());
    }

    #[test]
    fn check_naturals_needs_a_dealt_round() {
        let (mut table, _) = table_with(1, 4);
        assert_eq!(table.check_naturals(), Err(BlackjackGameError::RoundNotInProgress));
    }

    #[test]
    fn check_naturals_settles_once() {
        let (mut table, _) = table_with(0, 4);
        table.place_user_bet(10).unwrap();
        let mut shoe = Shoe::new();
        table.deal_round(&mut shoe).unwrap();

        table.participants[0].hand = Some(Hand::from_cards(vec![card(Rank::Ace), card(Rank::King)]));
        table.dealer.hand = Some(Hand::from_cards(vec![card(Rank::Nine), card(Rank::Seven)]));

        assert_eq!(table.check_naturals(), Ok(false));
        let user = table.user().unwrap();
        assert_eq!(user.chips, 55.0);
        assert_eq!(user.bet, 0);
        assert!(!user.hand.as_ref().unwrap().is_active());
        assert_eq!(
            table.settlements(),
            &[Settlement::Natural {
                name: "Ada".to_string(),
                payout: 15.0
            }]
        );
        assert_eq!(table.round_state(), Some(RoundState::Settled));
        assert_eq!(table.check_naturals(), Err(BlackjackGameError::RoundNotInProgress));
    }

    #[test]
    fn dealer_natural_ends_round() {
        let (mut table, _) = table_with(0, 4);
        table.place_user_bet(10).unwrap();
        let mut shoe = Shoe::new();
        table.deal_round(&mut shoe).unwrap();

        table.participants[0].hand = Some(Hand::from_cards(vec![card(Rank::Ace), card(Rank::Queen)]));
        table.dealer.hand = Some(Hand::from_cards(vec![card(Rank::Jack), card(Rank::Ace)]));

        assert_eq!(table.check_naturals(), Ok(true));
        let user = table.user().unwrap();
        assert_eq!(user.chips, 50.0);
        assert_eq!(user.bet, 0);
    }

    #[test]
    fn unsettled_bets_are_forfeited() {
        let (mut table, mut rng) = table_with(2, 8);
        table.place_cpu_bets(&mut rng).unwrap();
        table.place_user_bet(4).unwrap();
        assert_eq!(
            table.forfeit_unsettled_bets(),
            Err(BlackjackGameError::RoundNotInProgress)
        );

        let mut shoe = Shoe::new();
        table.deal_round(&mut shoe).unwrap();
        for p in table.participants.iter_mut() {
            p.hand = Some(Hand::from_cards(vec![card(Rank::Nine), card(Rank::Eight)]));
        }
        table.dealer.hand = Some(Hand::from_cards(vec![card(Rank::Ten), card(Rank::Seven)]));
        assert_eq!(
            table.forfeit_unsettled_bets(),
            Err(BlackjackGameError::RoundNotInProgress)
        );
        assert_eq!(table.check_naturals(), Ok(false));

        let forfeits = table.forfeit_unsettled_bets().unwrap();
        assert_eq!(forfeits.len(), 3);
        assert!(table.participants().iter().all(|p| p.bet == 0));
        assert_eq!(table.user().unwrap().chips, 46.0);
    }

    #[test]
    fn end_round_returns_all_cards() {
        let (mut table, mut rng) = table_with(3, 6);
        let mut shoe = Shoe::new();
        shoe.shuffle(&mut rng);
        table.place_cpu_bets(&mut rng).unwrap();
        table.place_user_bet(5).unwrap();
        table.deal_round(&mut shoe).unwrap();
        table.check_naturals().unwrap();
        let bets: Vec<u32> = table.participants().iter().map(|p| p.bet).collect();

        let cards = table.end_round();
        assert_eq!(cards.len(), 10);
        assert!(table.participants().iter().all(|p| p.hand.is_none()));
        assert!(table.dealer().hand.is_none());
        assert_eq!(table.round_state(), None);
        assert_eq!(bets, table.participants().iter().map(|p| p.bet).collect::<Vec<u32>>());

        shoe.discard(cards);
        assert_eq!(shoe.len() + shoe.discarded().len(), 52);
    }

    #[test]
    fn broke_opponents_leave_the_table() {
        let (mut table, _) = table_with(3, 7);
        for p in table.participants.iter_mut() {
            if p.name() == "CPU2" {
                p.chips = 0.0;
            }
        }
        assert_eq!(table.remove_broke_opponents(), vec!["CPU2".to_string()]);
        assert_eq!(table.opponents().count(), 2);
        assert!(!table.user_is_broke());

        for p in table.participants.iter_mut().filter(|p| p.is_human()) {
            p.chips = 1.5;
        }
        assert!(table.user_is_broke());
        assert!(table.remove_broke_opponents().is_empty());
        assert!(table.user().is_some());
    }
}
