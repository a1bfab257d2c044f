//! RPS Arena - console front end
//!
//! A menu-driven terminal game of Rock-Paper-Scissors(-Lizard-Spock) against
//! adaptive AI opponents, with ratings and achievements persisted to a JSON
//! file between runs.

pub mod console;
pub mod error;
pub mod instructions;
pub mod state;

use std::io::{BufRead, Write};

use tracing::{error, warn};

pub use console::{Console, MoveInput};
pub use error::{ArenaError, ConfigError};
pub use state::{ArenaConfig, Args, Session};

use instructions::*;
use state::DEFAULT_PLAYER_NAME;

const MENU: &str = "\nMenu:
 1) Play match
 2) Show my stats
 3) Change ruleset (RPS/RPSLS)
 4) Quick AI vs. AI demo (watch AIs play)
 5) Reset my stats
 0) Quit";

/// Resolve the player's name: the configured one, else prompt with a default
pub fn prompt_player_name<R: BufRead, W: Write>(
    config: &ArenaConfig,
    console: &mut Console<R, W>,
) -> Result<String, ArenaError> {
    if let Some(name) = &config.player_name {
        return Ok(name.clone());
    }
    let answer = console.ask(&format!("Enter your name (default: {}): ", DEFAULT_PLAYER_NAME))?;
    Ok(answer
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| DEFAULT_PLAYER_NAME.to_string()))
}

/// Run the main menu until the player quits or input runs out
pub fn run<R: BufRead, W: Write>(
    session: &mut Session,
    console: &mut Console<R, W>,
) -> Result<(), ArenaError> {
    loop {
        console.say(MENU)?;
        let Some(choice) = console.ask("Choose an option: ")? else {
            break;
        };

        let outcome = match choice.as_str() {
            "1" => play_match(session, console).map(|_| ()),
            "2" => show_stats(session, console),
            "3" => change_ruleset(session, console),
            "4" => run_demo(session, console).map(|_| ()),
            "5" => reset_stats(session, console),
            "0" => break,
            _ => console.say("Unknown option.").map_err(ArenaError::from),
        };

        match outcome {
            Ok(()) => {}
            Err(e) if e.is_recoverable() => {
                warn!(error = %e, "menu action failed");
                console.say(format!("Could not save stats: {}", e))?;
            }
            Err(e) => {
                error!(error = %e, "menu action failed");
                return Err(e);
            }
        }
    }

    console.say("Goodbye, thanks for playing! Stats saved.")?;
    Ok(())
}
