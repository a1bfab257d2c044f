//! AI-vs-AI exhibition

use std::io::{BufRead, Write};

use rps_logic::{run_exhibition, ExhibitionResult, RuleSet, StrategyBase};
use tracing::info;

use crate::console::Console;
use crate::error::ArenaError;
use crate::state::{Session, DEMO_ROUNDS};

/// Markov vs Frequency over a fixed number of classic RPS rounds
///
/// Each demo draws its seed from the session's next stream, so repeated
/// demos differ while a `--seed` run stays reproducible.
pub fn run_demo<R: BufRead, W: Write>(
    session: &mut Session,
    console: &mut Console<R, W>,
) -> Result<ExhibitionResult, ArenaError> {
    let (a, b) = (StrategyBase::Markov, StrategyBase::Frequency);
    console.say(format!(
        "\nAI vs AI demo: {} vs {} for {} rounds",
        a.key(),
        b.key(),
        DEMO_ROUNDS
    ))?;

    let seed = session.next_rng().next_seed();
    let result = run_exhibition(a, b, RuleSet::Rps, DEMO_ROUNDS, &seed);
    info!(
        wins_a = result.wins_a,
        wins_b = result.wins_b,
        ties = result.ties,
        "demo finished"
    );

    console.say(format!(
        "Demo result: {} {} - {} {} (ties: {})",
        a.player_name(),
        result.wins_a,
        result.wins_b,
        b.player_name(),
        result.ties
    ))?;
    Ok(result)
}
