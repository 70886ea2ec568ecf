use crate::config::GameConfig;
use crate::console::Console;
use crate::CliError;
use blackjack_lib::{BlackjackGameError, Shoe, Table};
use log::info;
use rand::Rng;
use std::io::{BufRead, Write};

const BROKE_MESSAGE: &str = "You can no longer cover the minimum bet. Thanks for playing!";

/// Runs an interactive game until the user stops, runs out of chips or closes the input.
/// Returns the table so its final state can be reported.
pub fn play<R, W, G>(
    settings: &GameConfig,
    console: &mut Console<R, W>,
    rng: &mut G,
) -> Result<Table, CliError>
where
    R: BufRead,
    W: Write,
    G: Rng + ?Sized,
{
    console.say("Welcome to Rusty Blackjack!")?;
    let title = match &settings.title {
        Some(title) => title.clone(),
        None => console.ask("Give your game a title: ")?,
    };
    let num_opponents = match settings.num_opponents {
        Some(n) => n,
        None => console.ask_parsed("How many opponents would you like to face? ")?,
    };

    let config = settings
        .table_builder()
        .title(title)
        .num_opponents(num_opponents)
        .build();
    let mut table = Table::new(&config)?;

    let name = match &settings.player_name {
        Some(name) => name.clone(),
        None => console.ask("Dealer: Welcome to the table. What is your name? ")?,
    };
    table.create_participants(&name, num_opponents, rng)?;
    console.say(format!(
        "Howdy, {}. The {} other players have arrived.",
        name, num_opponents
    ))?;
    console.list_opponents(&table)?;

    loop {
        if table.user_is_broke() {
            console.say(BROKE_MESSAGE)?;
            break;
        }
        match console.ask("Press enter to start the game. ") {
            Ok(_) => {}
            Err(CliError::InputClosed) => break,
            Err(e) => return Err(e),
        }
        console.pause()?;
        console.show_chips(&table)?;

        place_user_bet(&mut table, console)?;
        table.place_cpu_bets(rng)?;

        let mut shoe = Shoe::new();
        shoe.shuffle(rng);
        console.say("The dealer shuffles the deck.")?;
        console.pause()?;

        table.deal_round(&mut shoe)?;
        console.say("Each player is dealt two cards.")?;
        console.say("The dealer is dealt two cards with one face down.")?;
        console.pause()?;
        console.show_hands(&table)?;

        let round_over = table.check_naturals()?;
        console.announce(table.settlements())?;
        if round_over {
            console.say("The dealer has a natural blackjack. The round is over and bets are forfeited.")?;
        } else {
            let forfeits = table.forfeit_unsettled_bets()?;
            if !forfeits.is_empty() {
                console.say("There is no turn play at this table, open bets go to the house.")?;
                console.announce(&forfeits)?;
            }
        }

        shoe.discard(table.end_round());
        info!(
            "round finished with {} cards left in the shoe and {} discarded",
            shoe.len(),
            shoe.discarded().len()
        );

        for name in table.remove_broke_opponents() {
            console.say(format!("{} is out of chips and leaves the table.", name))?;
        }
        if table.user_is_broke() {
            console.say(BROKE_MESSAGE)?;
            break;
        }

        if !console.confirm("Play another hand? (y/n) ")? {
            break;
        }
    }

    console.show_chips(&table)?;
    Ok(table)
}

/// Asks for the user's bet until the table accepts it.
fn place_user_bet<R: BufRead, W: Write>(
    table: &mut Table,
    console: &mut Console<R, W>,
) -> Result<(), CliError> {
    let limits = table.limits();
    let prompt = format!(
        "Place your bets (min - {}, max - {}): ",
        limits.min_bet, limits.max_bet
    );
    loop {
        let bet: u32 = console.ask_parsed(&prompt)?;
        match table.place_user_bet(bet) {
            Ok(()) => return Ok(()),
            Err(
                e @ (BlackjackGameError::BetBelowMinimum { .. }
                | BlackjackGameError::BetAboveMaximum { .. }
                | BlackjackGameError::InsufficientChips { .. }),
            ) => console.say(format!("{}.", e))?,
            Err(e) => return Err(e.into()),
        }
    }
}
