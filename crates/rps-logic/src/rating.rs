//! Elo-style rating update

use crate::game::MatchResult;

/// Rating given to players (and AI opponents) with no record yet
pub const DEFAULT_RATING: f64 = 1200.0;

/// Maximum rating change per match
pub const ELO_K: f64 = 20.0;

/// Expected score of `player` against `opponent` under the logistic model
pub fn expected_score(player: f64, opponent: f64) -> f64 {
    1.0 / (1.0 + 10f64.powf((opponent - player) / 400.0))
}

/// New rating for `player` after a match, rounded to the nearest integer
pub fn updated_rating(player: f64, opponent: f64, result: MatchResult) -> f64 {
    let expected = expected_score(player, opponent);
    (player + ELO_K * (result.score_value() - expected)).round()
}
