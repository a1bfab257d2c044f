//! Admin instructions

use std::io::{BufRead, Write};

use rps_logic::RuleSet;
use tracing::info;

use crate::console::Console;
use crate::error::ArenaError;
use crate::state::Session;

/// Ask which rule set to use. Empty input keeps the session default,
/// anything other than "2" means classic RPS. `None` at end of input.
pub fn prompt_ruleset<R: BufRead, W: Write>(
    session: &Session,
    console: &mut Console<R, W>,
) -> Result<Option<RuleSet>, ArenaError> {
    console.say("Which ruleset? (1) RPS (2) RPSLS")?;
    let Some(choice) = console.ask(&format!("Choose (default: {}): ", session.ruleset))? else {
        return Ok(None);
    };
    let ruleset = match choice.as_str() {
        "" => session.ruleset,
        "2" => RuleSet::Rpsls,
        _ => RuleSet::Rps,
    };
    Ok(Some(ruleset))
}

/// Change the rule set offered by default for the rest of the session
pub fn change_ruleset<R: BufRead, W: Write>(
    session: &mut Session,
    console: &mut Console<R, W>,
) -> Result<(), ArenaError> {
    let Some(ruleset) = prompt_ruleset(session, console)? else {
        return Ok(());
    };
    if ruleset != session.ruleset {
        info!(from = %session.ruleset, to = %ruleset, "default rule set changed");
        session.ruleset = ruleset;
    }
    console.say(format!("Default ruleset is now {}.", ruleset))?;
    Ok(())
}

/// Wipe the current player's record after confirmation
pub fn reset_stats<R: BufRead, W: Write>(
    session: &mut Session,
    console: &mut Console<R, W>,
) -> Result<(), ArenaError> {
    let confirmed = console
        .ask("Are you sure you want to reset your stats? (yes/no): ")?
        .is_some_and(|answer| answer.eq_ignore_ascii_case("yes"));

    if !confirmed {
        console.say("Cancelled.")?;
        return Ok(());
    }

    session.stats.reset_player(&session.player_name)?;
    console.say("Stats reset.")?;
    Ok(())
}
