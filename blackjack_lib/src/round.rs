//! Settlement of natural blackjacks right after the initial deal.

use crate::participant::Participant;
use crate::BlackjackGameError;
use log::info;

/// A natural pays 3 to 2.
pub const NATURAL_PAYOUT: f32 = 1.5;

/// Lifecycle of a single betting round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundState {
    InProgress,
    Settled,
}

/// A chip adjustment made while checking naturals.
#[derive(Debug, Clone, PartialEq)]
pub enum Settlement {
    /// Both the dealer and the participant hold a natural, the bet is returned.
    Push { name: String, bet: u32 },
    /// Only the participant holds a natural, the bet is paid at 3:2.
    Natural { name: String, payout: f32 },
    /// The dealer holds a natural, the participant's bet is lost and the round ends.
    Forfeit { name: String, bet: u32 },
}

/// Result of checking the initial deal for naturals.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NaturalsReport {
    pub dealer_natural: bool,
    pub settlements: Vec<Settlement>,
}

impl NaturalsReport {
    /// The round ends immediately when the dealer was dealt a natural.
    pub fn round_over(&self) -> bool {
        self.dealer_natural
    }
}

/// Checks every participant's initial hand against the dealer's and settles naturals.
///
/// Participants sitting out the round are skipped. Every other participant must hold a hand,
/// otherwise `MissingHand` is returned before any chips move.
pub fn check_naturals(
    dealer: &Participant,
    participants: &mut [Participant],
) -> Result<NaturalsReport, BlackjackGameError> {
    let dealer_natural = dealer
        .hand
        .as_ref()
        .ok_or_else(|| BlackjackGameError::MissingHand(dealer.name().to_string()))?
        .is_natural();

    if let Some(p) = participants
        .iter()
        .find(|p| !p.sitting_out && p.hand.is_none())
    {
        return Err(BlackjackGameError::MissingHand(p.name().to_string()));
    }

    let mut report = NaturalsReport {
        dealer_natural,
        settlements: Vec::new(),
    };

    for player in participants.iter_mut().filter(|p| !p.sitting_out) {
        let player_natural = player.hand.as_ref().map_or(false, |h| h.is_natural());
        let bet = player.bet;

        if player_natural && dealer_natural {
            // Push: the hand is left active
            player.chips += bet as f32;
            player.bet = 0;
            info!(
                "the dealer and {} have a natural blackjack, {} is returned their bet of {}",
                player.name(),
                player.name(),
                bet
            );
            report.settlements.push(Settlement::Push {
                name: player.name().to_string(),
                bet,
            });
        } else if player_natural {
            let payout = bet as f32 * NATURAL_PAYOUT;
            player.chips += payout;
            player.bet = 0;
            if let Some(hand) = player.hand.as_mut() {
                hand.deactivate();
            }
            info!("{} has a natural blackjack and is paid {} chips", player.name(), payout);
            report.settlements.push(Settlement::Natural {
                name: player.name().to_string(),
                payout,
            });
        } else if dealer_natural {
            // No turn phase follows, the bet stays with the house
            player.bet = 0;
            info!("{} forfeits a bet of {} to the dealer's natural", player.name(), bet);
            report.settlements.push(Settlement::Forfeit {
                name: player.name().to_string(),
                bet,
            });
        }
    }

    if dealer_natural {
        info!("the dealer has a natural blackjack, the round is over");
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{Card, Rank, Suit};
    use crate::hand::Hand;
    use crate::participant::Role;

    fn hand_of(first: Rank, second: Rank) -> Hand {
        Hand::from_cards(vec![Card::new(first, Suit::Spades), Card::new(second, Suit::Clubs)])
    }

    fn dealer_with(first: Rank, second: Rank) -> Participant {
        let mut dealer = Participant::dealer();
        dealer.hand = Some(hand_of(first, second));
        dealer
    }

    fn player_with(name: &str, chips: f32, bet: u32, first: Rank, second: Rank) -> Participant {
        let mut player = Participant::new(name, Role::Automated, chips);
        player.bet = bet;
        player.hand = Some(hand_of(first, second));
        player
    }

    #[test]
    fn double_natural_is_a_push() {
        let dealer = dealer_with(Rank::Ace, Rank::King);
        let mut players = vec![player_with("CPU1", 40.0, 10, Rank::Queen, Rank::Ace)];

        let report = check_naturals(&dealer, &mut players).unwrap();

        assert!(report.round_over());
        assert_eq!(players[0].chips, 50.0);
        assert_eq!(players[0].bet, 0);
        assert!(players[0].hand.as_ref().unwrap().is_active());
        assert_eq!(
            report.settlements,
            vec![Settlement::Push {
                name: "CPU1".to_string(),
                bet: 10
            }]
        );
    }

    #[test]
    fn lone_natural_pays_three_to_two() {
        let dealer = dealer_with(Rank::Nine, Rank::King);
        let mut players = vec![player_with("CPU1", 40.0, 10, Rank::Ace, Rank::Jack)];

        let report = check_naturals(&dealer, &mut players).unwrap();

        assert!(!report.round_over());
        assert_eq!(players[0].chips, 55.0);
        assert_eq!(players[0].bet, 0);
        assert!(!players[0].hand.as_ref().unwrap().is_active());
    }

    #[test]
    fn odd_bet_pays_fractional_chips() {
        let dealer = dealer_with(Rank::Two, Rank::Three);
        let mut players = vec![player_with("CPU1", 0.0, 5, Rank::Ace, Rank::Ten)];

        check_naturals(&dealer, &mut players).unwrap();

        assert_eq!(players[0].chips, 7.5);
    }

    #[test]
    fn no_naturals_changes_nothing() {
        let dealer = dealer_with(Rank::Nine, Rank::King);
        let mut players = vec![
            player_with("CPU1", 40.0, 10, Rank::Two, Rank::Jack),
            player_with("CPU2", 30.0, 20, Rank::King, Rank::Queen),
        ];

        let report = check_naturals(&dealer, &mut players).unwrap();

        assert!(!report.round_over());
        assert!(report.settlements.is_empty());
        assert_eq!(players[0].chips, 40.0);
        assert_eq!(players[0].bet, 10);
        assert_eq!(players[1].chips, 30.0);
        assert_eq!(players[1].bet, 20);
        assert!(players.iter().all(|p| p.hand.as_ref().unwrap().is_active()));
    }

    #[test]
    fn dealer_natural_forfeits_other_bets() {
        let dealer = dealer_with(Rank::King, Rank::Ace);
        let mut players = vec![player_with("CPU1", 40.0, 10, Rank::Two, Rank::Jack)];

        let report = check_naturals(&dealer, &mut players).unwrap();

        assert!(report.round_over());
        assert_eq!(players[0].chips, 40.0);
        assert_eq!(players[0].bet, 0);
        assert_eq!(
            report.settlements,
            vec![Settlement::Forfeit {
                name: "CPU1".to_string(),
                bet: 10
            }]
        );
    }

    #[test]
    fn sitting_out_participants_are_skipped() {
        let dealer = dealer_with(Rank::King, Rank::Ace);
        let mut idle = Participant::new("CPU2", Role::Automated, 1.0);
        idle.sitting_out = true;
        let mut players = vec![idle];

        let report = check_naturals(&dealer, &mut players).unwrap();

        assert!(report.settlements.is_empty());
        assert_eq!(players[0].chips, 1.0);
    }

    #[test]
    fn missing_hand_is_reported_before_settling() {
        let dealer = dealer_with(Rank::Nine, Rank::King);
        let mut players = vec![
            player_with("CPU1", 40.0, 10, Rank::Ace, Rank::Jack),
            Participant::new("Ada", Role::Human, 50.0),
        ];

        assert_eq!(
            check_naturals(&dealer, &mut players),
            Err(BlackjackGameError::MissingHand("Ada".to_string()))
        );
        assert_eq!(players[0].chips, 40.0);

        let mut handless_dealer = Participant::dealer();
        handless_dealer.hand = None;
        assert!(check_naturals(&handless_dealer, &mut players).is_err());
    }
}
