//! Best-of-N matches and AI-vs-AI exhibitions

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::RpsError;
use crate::outcome::{resolve, Outcome};
use crate::random::SeededRng;
use crate::rules::{Move, RuleSet};
use crate::strategy::{Strategy, StrategyBase};

/// One completed round: what the human played and what the opponent played.
/// Serialized as a `[player, opponent]` pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(Move, Move)", into = "(Move, Move)")]
pub struct RoundRecord {
    pub player_move: Move,
    pub opponent_move: Move,
}

impl From<(Move, Move)> for RoundRecord {
    fn from((player_move, opponent_move): (Move, Move)) -> Self {
        Self { player_move, opponent_move }
    }
}

impl From<RoundRecord> for (Move, Move) {
    fn from(r: RoundRecord) -> Self {
        (r.player_move, r.opponent_move)
    }
}

/// Running round tallies. Ties count toward neither side.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub player: u32,
    pub opponent: u32,
    pub ties: u32,
}

/// Match result from the human's perspective
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchResult {
    Win,
    Loss,
    Tie,
}

impl MatchResult {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchResult::Win => "win",
            MatchResult::Loss => "loss",
            MatchResult::Tie => "tie",
        }
    }

    /// Score used by the rating update
    pub fn score_value(&self) -> f64 {
        match self {
            MatchResult::Win => 1.0,
            MatchResult::Tie => 0.5,
            MatchResult::Loss => 0.0,
        }
    }

    fn from_score(score: &Score) -> Self {
        match score.player.cmp(&score.opponent) {
            core::cmp::Ordering::Greater => MatchResult::Win,
            core::cmp::Ordering::Less => MatchResult::Loss,
            core::cmp::Ordering::Equal => MatchResult::Tie,
        }
    }
}

/// What happened in a single call to [`Match::play_round`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundReport {
    pub round: u32,
    pub player_move: Move,
    pub opponent_move: Move,
    pub outcome: Outcome,
    pub score: Score,
}

/// Best-of-N targets must be odd and at least 1
pub fn normalize_rounds(rounds: u32) -> u32 {
    let rounds = rounds.max(1);
    if rounds % 2 == 0 {
        rounds + 1
    } else {
        rounds
    }
}

/// A best-of-N match between a human and one opponent
///
/// Owns its opponent for the lifetime of the match. The match is over as soon
/// as either side reaches a majority of `rounds_target`.
#[derive(Clone, Debug)]
pub struct Match {
    ruleset: RuleSet,
    rounds_target: u32,
    score: Score,
    history: Vec<RoundRecord>,
    opponent: Strategy,
}

impl Match {
    /// Start a match. The opponent is reset and decides the rule set.
    pub fn new(rounds_target: u32, mut opponent: Strategy) -> Self {
        opponent.reset();
        Self {
            ruleset: opponent.ruleset(),
            rounds_target: normalize_rounds(rounds_target),
            score: Score::default(),
            history: Vec::new(),
            opponent,
        }
    }

    pub fn ruleset(&self) -> RuleSet {
        self.ruleset
    }

    pub fn rounds_target(&self) -> u32 {
        self.rounds_target
    }

    /// Round wins needed to take the match
    pub fn threshold(&self) -> u32 {
        self.rounds_target / 2 + 1
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn history(&self) -> &[RoundRecord] {
        &self.history
    }

    pub fn opponent(&self) -> &Strategy {
        &self.opponent
    }

    pub fn is_over(&self) -> bool {
        let needed = self.threshold();
        self.score.player >= needed || self.score.opponent >= needed
    }

    /// The human's result, once the match is over
    pub fn result(&self) -> Option<MatchResult> {
        self.is_over().then(|| MatchResult::from_score(&self.score))
    }

    /// Play one round against the opponent
    ///
    /// Nothing is mutated when an error is returned.
    pub fn play_round(&mut self, player_move: Move) -> Result<RoundReport, RpsError> {
        if self.is_over() {
            return Err(RpsError::MatchOver);
        }
        if !self.ruleset.contains(player_move) {
            return Err(RpsError::invalid_move(player_move, self.ruleset));
        }

        let opponent_move = self.opponent.choose_move();
        let outcome = resolve(player_move, opponent_move, self.ruleset);

        match outcome {
            Outcome::WinA => self.score.player += 1,
            Outcome::WinB => self.score.opponent += 1,
            Outcome::Tie => self.score.ties += 1,
        }
        self.history.push(RoundRecord { player_move, opponent_move });
        self.opponent.observe(player_move, opponent_move);

        let round = self.history.len() as u32;
        debug!(
            round,
            %player_move,
            %opponent_move,
            ?outcome,
            opponent = self.opponent.name(),
            "round played"
        );

        Ok(RoundReport {
            round,
            player_move,
            opponent_move,
            outcome,
            score: self.score,
        })
    }

    /// "P - O (ties: T)"
    pub fn summary_line(&self) -> String {
        format!(
            "{} - {} (ties: {})",
            self.score.player, self.score.opponent, self.score.ties
        )
    }

    /// Hand the opponent back, e.g. to start a rematch
    pub fn into_opponent(self) -> Strategy {
        self.opponent
    }
}

/// One round of an AI-vs-AI exhibition
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExhibitionRound {
    pub round: u32,
    pub move_a: Move,
    pub move_b: Move,
    pub outcome: Outcome,
    pub cumulative_a: u32,
    pub cumulative_b: u32,
}

/// Result of a complete exhibition
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExhibitionResult {
    pub rounds: Vec<ExhibitionRound>,
    pub wins_a: u32,
    pub wins_b: u32,
    pub ties: u32,
    pub round_count: u32,
}

/// Run a fixed-length exhibition between two strategies
///
/// Each side observes the other's moves as if it were the human. Every round
/// is played; there is no early termination.
pub fn run_exhibition(
    base_a: StrategyBase,
    base_b: StrategyBase,
    ruleset: RuleSet,
    round_count: u32,
    seed: &[u8; 32],
) -> ExhibitionResult {
    let mut a = Strategy::new(base_a, ruleset, SeededRng::new(seed, 0));
    let mut b = Strategy::new(base_b, ruleset, SeededRng::new(seed, 1));

    let mut rounds = Vec::with_capacity(round_count as usize);
    let mut wins_a = 0u32;
    let mut wins_b = 0u32;
    let mut ties = 0u32;

    for round in 0..round_count {
        let move_a = a.choose_move();
        let move_b = b.choose_move();

        let outcome = resolve(move_a, move_b, ruleset);
        match outcome {
            Outcome::WinA => wins_a += 1,
            Outcome::WinB => wins_b += 1,
            Outcome::Tie => ties += 1,
        }

        a.observe(move_b, move_a);
        b.observe(move_a, move_b);

        rounds.push(ExhibitionRound {
            round,
            move_a,
            move_b,
            outcome,
            cumulative_a: wins_a,
            cumulative_b: wins_b,
        });
    }

    ExhibitionResult {
        rounds,
        wins_a,
        wins_b,
        ties,
        round_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_match(base: StrategyBase, ruleset: RuleSet, rounds: u32) -> Match {
        let opponent = Strategy::new(base, ruleset, SeededRng::new(&[42u8; 32], 0));
        Match::new(rounds, opponent)
    }

    /// Peek at the opponent's next move by running a clone of it
    fn next_opponent_move(m: &Match) -> Move {
        m.opponent().clone().choose_move()
    }

    fn winning_move(m: &Match) -> Move {
        m.ruleset().counters(next_opponent_move(m))[0]
    }

    fn losing_move(m: &Match) -> Move {
        m.ruleset().beaten_by(next_opponent_move(m))[0]
    }

    #[test]
    fn test_normalize_rounds() {
        assert_eq!(normalize_rounds(0), 1);
        assert_eq!(normalize_rounds(1), 1);
        assert_eq!(normalize_rounds(2), 3);
        assert_eq!(normalize_rounds(3), 3);
        assert_eq!(normalize_rounds(4), 5);
    }

    #[test]
    fn test_threshold() {
        assert_eq!(new_match(StrategyBase::Random, RuleSet::Rps, 1).threshold(), 1);
        assert_eq!(new_match(StrategyBase::Random, RuleSet::Rps, 3).threshold(), 2);
        assert_eq!(new_match(StrategyBase::Random, RuleSet::Rps, 4).threshold(), 3);
        assert_eq!(new_match(StrategyBase::Random, RuleSet::Rps, 7).threshold(), 4);
    }

    #[test]
    fn test_initial_state() {
        let m = new_match(StrategyBase::Markov, RuleSet::Rpsls, 5);
        assert_eq!(m.score(), Score::default());
        assert!(m.history().is_empty());
        assert!(!m.is_over());
        assert_eq!(m.result(), None);
        assert_eq!(m.summary_line(), "0 - 0 (ties: 0)");
    }

    #[test]
    fn test_two_wins_end_best_of_three() {
        let mut m = new_match(StrategyBase::Random, RuleSet::Rps, 3);

        let mv = winning_move(&m);
        let report = m.play_round(mv).unwrap();
        assert_eq!(report.outcome, Outcome::WinA);
        assert!(!m.is_over());

        let mv = winning_move(&m);
        let report = m.play_round(mv).unwrap();
        assert_eq!(report.outcome, Outcome::WinA);
        assert_eq!(report.score.player, 2);

        assert!(m.is_over());
        assert_eq!(m.history().len(), 2);
        assert_eq!(m.result(), Some(MatchResult::Win));
        assert_eq!(m.play_round(Move::Rock), Err(RpsError::MatchOver));
        assert_eq!(m.history().len(), 2, "no round is recorded after the match ends");
    }

    #[test]
    fn test_opponent_can_win() {
        let mut m = new_match(StrategyBase::Random, RuleSet::Rpsls, 3);
        while !m.is_over() {
            let mv = losing_move(&m);
            assert_eq!(m.play_round(mv).unwrap().outcome, Outcome::WinB);
        }
        assert_eq!(m.score().opponent, 2);
        assert_eq!(m.result(), Some(MatchResult::Loss));
    }

    #[test]
    fn test_ties_do_not_count() {
        let mut m = new_match(StrategyBase::Random, RuleSet::Rps, 1);
        for _ in 0..5 {
            let mv = next_opponent_move(&m);
            let report = m.play_round(mv).unwrap();
            assert_eq!(report.outcome, Outcome::Tie);
        }
        assert!(!m.is_over());
        assert_eq!(m.score().ties, 5);
        assert_eq!(m.summary_line(), "0 - 0 (ties: 5)");

        let mv = winning_move(&m);
        m.play_round(mv).unwrap();
        assert!(m.is_over());
        assert_eq!(m.history().len(), 6);
    }

    #[test]
    fn test_invalid_move_is_rejected_without_mutation() {
        let mut m = new_match(StrategyBase::Frequency, RuleSet::Rps, 3);
        let err = m.play_round(Move::Spock).unwrap_err();
        assert!(matches!(err, RpsError::InvalidMove { .. }));
        assert!(m.history().is_empty());
        assert_eq!(m.opponent().predict(), None);
    }

    #[test]
    fn test_opponent_observes_rounds() {
        let mut m = new_match(StrategyBase::Frequency, RuleSet::Rps, 101);
        m.play_round(Move::Rock).unwrap();
        assert_eq!(m.opponent().predict(), Some(Move::Rock));
        for _ in 0..5 {
            let report = m.play_round(Move::Rock).unwrap();
            assert_eq!(report.opponent_move, Move::Paper);
            assert_eq!(report.outcome, Outcome::WinB);
        }
    }

    #[test]
    fn test_new_match_resets_opponent() {
        let mut opponent = Strategy::new(StrategyBase::Markov, RuleSet::Rps, SeededRng::from_u64(1));
        opponent.observe(Move::Rock, Move::Paper);
        let m = Match::new(3, opponent);
        assert_eq!(m.opponent().predict(), None);
    }

    #[test]
    fn test_round_record_serializes_as_pair() {
        let record = RoundRecord { player_move: Move::Rock, opponent_move: Move::Paper };
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"["rock","paper"]"#);
        let back: RoundRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_score_values() {
        assert_eq!(MatchResult::Win.score_value(), 1.0);
        assert_eq!(MatchResult::Tie.score_value(), 0.5);
        assert_eq!(MatchResult::Loss.score_value(), 0.0);
    }

    #[test]
    fn test_exhibition_determinism() {
        let seed = [7u8; 32];
        let r1 = run_exhibition(StrategyBase::Markov, StrategyBase::Frequency, RuleSet::Rps, 50, &seed);
        let r2 = run_exhibition(StrategyBase::Markov, StrategyBase::Frequency, RuleSet::Rps, 50, &seed);

        assert_eq!(r1.wins_a, r2.wins_a);
        assert_eq!(r1.wins_b, r2.wins_b);
        for (x, y) in r1.rounds.iter().zip(r2.rounds.iter()) {
            assert_eq!(x.move_a, y.move_a);
            assert_eq!(x.move_b, y.move_b);
        }
    }

    #[test]
    fn test_exhibition_totals() {
        let result = run_exhibition(StrategyBase::Random, StrategyBase::Markov, RuleSet::Rpsls, 50, &[3u8; 32]);
        assert_eq!(result.round_count, 50);
        assert_eq!(result.rounds.len(), 50);
        assert_eq!(result.wins_a + result.wins_b + result.ties, 50);

        let last = result.rounds.last().unwrap();
        assert_eq!(last.cumulative_a, result.wins_a);
        assert_eq!(last.cumulative_b, result.wins_b);
        for r in &result.rounds {
            assert!(RuleSet::Rpsls.contains(r.move_a));
            assert!(RuleSet::Rpsls.contains(r.move_b));
        }
    }

    #[test]
    fn test_exhibition_different_seeds_differ() {
        let r1 = run_exhibition(StrategyBase::Random, StrategyBase::Random, RuleSet::Rps, 30, &[1u8; 32]);
        let r2 = run_exhibition(StrategyBase::Random, StrategyBase::Random, RuleSet::Rps, 30, &[2u8; 32]);
        let moves1: Vec<_> = r1.rounds.iter().map(|r| (r.move_a, r.move_b)).collect();
        let moves2: Vec<_> = r2.rounds.iter().map(|r| (r.move_a, r.move_b)).collect();
        assert_ne!(moves1, moves2);
    }
}
