//! Player instructions

use std::io::{BufRead, Write};

use rps_logic::{
    describe_strategy, normalize_rounds, Match, MatchReport, MatchResult, Outcome, Strategy,
    StrategyBase,
};
use tracing::info;

use crate::console::{Console, MoveInput};
use crate::error::ArenaError;
use crate::instructions::admin::prompt_ruleset;
use crate::state::{Session, HISTORY_SHOWN};

/// Play one match against an AI opponent and record it
///
/// Returns `None` when the player aborts; nothing is recorded in that case.
pub fn play_match<R: BufRead, W: Write>(
    session: &mut Session,
    console: &mut Console<R, W>,
) -> Result<Option<MatchReport>, ArenaError> {
    console.say("\n--- Start Match ---")?;

    let Some(ruleset) = prompt_ruleset(session, console)? else {
        return Ok(None);
    };

    let keys: Vec<&str> = StrategyBase::ALL.iter().map(|b| b.key()).collect();
    console.say(format!("AI types: {}", keys.join(" | ")))?;
    let default_key = session.config.default_opponent.key();
    let Some(choice) = console.ask(&format!("Choose AI (default: {}): ", default_key))? else {
        return Ok(None);
    };
    let base = if choice.is_empty() {
        session.config.default_opponent
    } else {
        let base = StrategyBase::resolve_key(&choice);
        if StrategyBase::from_key(&choice).is_none() {
            console.say("Unknown AI, using Random.")?;
        }
        base
    };
    console.say(format!("{}: {}", base.player_name(), describe_strategy(base)))?;

    let Some(rounds) = console.read_int(
        "Best of how many rounds? ",
        Some(session.config.default_rounds),
        Some(1),
        None,
    )?
    else {
        return Ok(None);
    };
    let target = normalize_rounds(rounds);
    if target != rounds {
        console.say(format!("Adjusted to best-of-{} (odd number required).", target))?;
    }

    let opponent = Strategy::new(base, ruleset, session.next_rng());
    let mut game = Match::new(target, opponent);
    info!(player = %session.player_name, opponent = base.player_name(), %ruleset, target, "match started");

    while !game.is_over() {
        console.say(format!("\nScore: {}", game.summary_line()))?;
        let player_move = match console.read_move(ruleset)? {
            MoveInput::Move(mv) => mv,
            MoveInput::Quit => {
                console.say("\nMatch Aborted!")?;
                info!(player = %session.player_name, rounds = game.history().len(), "match abandoned");
                return Ok(None);
            }
        };

        let report = game.play_round(player_move)?;
        let line = match report.outcome {
            Outcome::WinA => format!(
                "You chose {}. AI chose {} -> You win the round!",
                player_move, report.opponent_move
            ),
            Outcome::WinB => format!(
                "You chose {}. AI chose {} -> AI wins the round!",
                player_move, report.opponent_move
            ),
            Outcome::Tie => format!("Both chose {}. It's a tie.", player_move),
        };
        console.say(line)?;
    }

    let score = game.score();
    let result = game.result().unwrap_or(MatchResult::Tie);
    match result {
        MatchResult::Win => console.say(format!(
            "\nMATCH RESULT: YOU WIN! {} to {}",
            score.player, score.opponent
        ))?,
        MatchResult::Loss => console.say(format!(
            "\nMATCH RESULT: AI WINS. {} to {}",
            score.opponent, score.player
        ))?,
        MatchResult::Tie => console.say("\nMATCH RESULT: TIE.")?,
    }

    let report = session.stats.record_match(
        &session.player_name,
        base.player_name(),
        result,
        game.history(),
    )?;

    console.say(format!(
        "Rating: {} -> {} (opponent rated {})",
        report.old_rating, report.new_rating, report.opponent_rating
    ))?;
    for achievement in &report.unlocked {
        console.say(format!("Achievement unlocked: {}!", achievement))?;
    }

    let moves = game.history();
    if moves.len() >= 3 && moves.iter().all(|r| r.player_move == moves[0].player_move) {
        console.say("Note: You used the same move many times. AI may adapt accordingly.")?;
    }

    Ok(Some(report))
}

/// Print the current player's statistics
pub fn show_stats<R: BufRead, W: Write>(
    session: &Session,
    console: &mut Console<R, W>,
) -> Result<(), ArenaError> {
    let name = session.player_name.clone();
    let record = session.stats.get(&name).cloned().unwrap_or_default();

    console.say(format!("\n--- Stats for {} ---", name))?;
    console.say(format!(
        "Wins: {}, Losses: {}, Ties: {}, Total: {}",
        record.wins, record.losses, record.ties, record.total_games
    ))?;
    console.say(format!("Rating: {}", record.rating))?;

    if record.achievements.is_empty() {
        console.say("Achievements: None")?;
    } else {
        let labels: Vec<&str> = record.achievements.iter().map(|a| a.label()).collect();
        console.say(format!("Achievements: {}", labels.join(", ")))?;
    }

    let recent = session.stats.recent_history(&name, HISTORY_SHOWN);
    if !recent.is_empty() {
        console.say("Last matches (most recent first):")?;
        for summary in recent {
            console.say(format!(
                "  vs {}: {} ({} rounds)",
                summary.opponent,
                summary.result.as_str(),
                summary.moves.len()
            ))?;
        }
    }

    Ok(())
}
