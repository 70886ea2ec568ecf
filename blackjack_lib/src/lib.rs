//! Core of a single blackjack table: the shoe, hands with Ace dual-value scoring, participants,
//! and the settlement of natural blackjacks after the initial deal.
//!
//! The crate does no terminal I/O. A console front end drives a round like so:
//!
//! ```
//! use blackjack_lib::{Shoe, Table, TableConfig};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let mut table = Table::new(&TableConfig::new().num_opponents(2).build()).unwrap();
//! table.create_participants("Ada", 2, &mut rng).unwrap();
//!
//! table.place_user_bet(10).unwrap();
//! table.place_cpu_bets(&mut rng).unwrap();
//!
//! let mut shoe = Shoe::new();
//! shoe.shuffle(&mut rng);
//! table.deal_round(&mut shoe).unwrap();
//!
//! let round_over = table.check_naturals().unwrap();
//! if !round_over {
//!     table.forfeit_unsettled_bets().unwrap();
//! }
//! shoe.discard(table.end_round());
//! assert_eq!(shoe.len() + shoe.discarded().len(), 52);
//! ```

pub mod card;
pub mod config;
pub mod error;
pub mod hand;
pub mod participant;
pub mod round;
pub mod shoe;
pub mod table;

pub use card::{Card, CardValue, Rank, Suit};
pub use config::{TableConfig, TableConfigBuilder};
pub use error::BlackjackGameError;
pub use hand::Hand;
pub use participant::{BetLimits, Participant, Role};
pub use round::{NaturalsReport, RoundState, Settlement};
pub use shoe::Shoe;
pub use table::Table;
