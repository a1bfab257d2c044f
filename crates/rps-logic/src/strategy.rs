//! Opponent strategies
//!
//! Every opponent predicts the human's next move from what it has observed so
//! far in the match, then plays something that beats the prediction.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::random::SeededRng;
use crate::rules::{Move, RuleSet};

/// Base strategy type
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StrategyBase {
    /// Uniform random choice each round.
    Random,
    /// Counter the human's most frequent move so far.
    Frequency,
    /// Counter the most likely successor of the human's last move.
    Markov,
}

impl StrategyBase {
    pub const ALL: [StrategyBase; 3] = [StrategyBase::Random, StrategyBase::Frequency, StrategyBase::Markov];

    /// Menu key for this strategy
    pub fn key(&self) -> &'static str {
        match self {
            StrategyBase::Random => "random",
            StrategyBase::Frequency => "freq",
            StrategyBase::Markov => "markov",
        }
    }

    /// Look up a strategy by menu key, any case
    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_ascii_lowercase().as_str() {
            "random" => Some(StrategyBase::Random),
            "freq" | "frequency" => Some(StrategyBase::Frequency),
            "markov" => Some(StrategyBase::Markov),
            _ => None,
        }
    }

    /// Like [`from_key`](Self::from_key) but unknown keys fall back to Random
    pub fn resolve_key(key: &str) -> Self {
        Self::from_key(key).unwrap_or_else(|| {
            warn!(key = key.trim(), "unknown opponent strategy, using random");
            StrategyBase::Random
        })
    }

    /// Name under which this opponent is rated as a synthetic player
    pub fn player_name(&self) -> &'static str {
        match self {
            StrategyBase::Random => "RandomAI",
            StrategyBase::Frequency => "FrequencyAI",
            StrategyBase::Markov => "MarkovAI",
        }
    }
}

/// Get a human-readable description of a strategy
pub fn describe_strategy(base: StrategyBase) -> &'static str {
    match base {
        StrategyBase::Random => "Plays a uniformly random move every round.",
        StrategyBase::Frequency => "Counters the move you have played most often this match.",
        StrategyBase::Markov => "Learns which move you tend to play after each move, and counters it.",
    }
}

/// Move counts that remember first-insertion order
///
/// Ties in [`most_common`](Self::most_common) go to the move seen first, so
/// predictions do not depend on hash iteration order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Tally {
    counts: Vec<(Move, u32)>,
}

impl Tally {
    pub fn record(&mut self, mv: Move) {
        match self.counts.iter_mut().find(|(m, _)| *m == mv) {
            Some((_, n)) => *n += 1,
            None => self.counts.push((mv, 1)),
        }
    }

    pub fn count(&self, mv: Move) -> u32 {
        self.counts
            .iter()
            .find(|(m, _)| *m == mv)
            .map_or(0, |(_, n)| *n)
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().map(|(_, n)| n).sum()
    }

    pub fn most_common(&self) -> Option<Move> {
        let mut best: Option<(Move, u32)> = None;
        for &(mv, n) in &self.counts {
            if best.map_or(true, |(_, top)| n > top) {
                best = Some((mv, n));
            }
        }
        best.map(|(mv, _)| mv)
    }
}

/// Adaptive state, reset at the start of every match
#[derive(Clone, Debug)]
enum Memory {
    Stateless,
    Frequency {
        freq: Tally,
    },
    Markov {
        transitions: BTreeMap<Move, Tally>,
        prev: Option<Move>,
        freq: Tally,
    },
}

impl Memory {
    fn fresh(base: StrategyBase) -> Self {
        match base {
            StrategyBase::Random => Memory::Stateless,
            StrategyBase::Frequency => Memory::Frequency { freq: Tally::default() },
            StrategyBase::Markov => Memory::Markov {
                transitions: BTreeMap::new(),
                prev: None,
                freq: Tally::default(),
            },
        }
    }
}

/// An opponent bound to a rule set and its own random stream
#[derive(Clone, Debug)]
pub struct Strategy {
    base: StrategyBase,
    ruleset: RuleSet,
    rng: SeededRng,
    memory: Memory,
}

impl Strategy {
    pub fn new(base: StrategyBase, ruleset: RuleSet, rng: SeededRng) -> Self {
        Self {
            base,
            ruleset,
            rng,
            memory: Memory::fresh(base),
        }
    }

    pub fn base(&self) -> StrategyBase {
        self.base
    }

    pub fn ruleset(&self) -> RuleSet {
        self.ruleset
    }

    pub fn name(&self) -> &'static str {
        self.base.player_name()
    }

    /// Forget everything observed so far
    pub fn reset(&mut self) {
        self.memory = Memory::fresh(self.base);
    }

    /// The move this opponent expects the human to play next
    pub fn predict(&self) -> Option<Move> {
        match &self.memory {
            Memory::Stateless => None,
            Memory::Frequency { freq } => freq.most_common(),
            Memory::Markov { transitions, prev, freq } => (*prev)
                .and_then(|p| transitions.get(&p))
                .and_then(Tally::most_common)
                .or_else(|| freq.most_common()),
        }
    }

    /// Pick this round's move
    pub fn choose_move(&mut self) -> Move {
        let mv = match self.predict() {
            Some(predicted) => {
                let counters = self.ruleset.counters(predicted);
                match self.rng.choose(&counters) {
                    Some(mv) => *mv,
                    None => self.random_move(),
                }
            }
            None => self.random_move(),
        };
        debug_assert!(self.ruleset.contains(mv), "{} chose illegal move {}", self.name(), mv);
        mv
    }

    /// Record a completed round
    pub fn observe(&mut self, human_move: Move, _own_move: Move) {
        match &mut self.memory {
            Memory::Stateless => {}
            Memory::Frequency { freq } => freq.record(human_move),
            Memory::Markov { transitions, prev, freq } => {
                if let Some(p) = *prev {
                    transitions.entry(p).or_default().record(human_move);
                }
                *prev = Some(human_move);
                freq.record(human_move);
            }
        }
    }

    fn random_move(&mut self) -> Move {
        let moves = self.ruleset.moves();
        moves[self.rng.next_range(moves.len() as u32) as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make(base: StrategyBase, ruleset: RuleSet, stream: u32) -> Strategy {
        Strategy::new(base, ruleset, SeededRng::new(&[42u8; 32], stream))
    }

    #[test]
    fn test_tally_tie_break_is_first_inserted() {
        let mut tally = Tally::default();
        assert_eq!(tally.most_common(), None);

        tally.record(Move::Scissors);
        tally.record(Move::Rock);
        assert_eq!(tally.most_common(), Some(Move::Scissors));

        tally.record(Move::Rock);
        assert_eq!(tally.most_common(), Some(Move::Rock));

        tally.record(Move::Scissors);
        assert_eq!(tally.most_common(), Some(Move::Scissors));
        assert_eq!(tally.count(Move::Rock), 2);
        assert_eq!(tally.count(Move::Paper), 0);
        assert_eq!(tally.total(), 4);
    }

    #[test]
    fn test_random_stays_in_ruleset() {
        for ruleset in RuleSet::ALL {
            let mut s = make(StrategyBase::Random, ruleset, 0);
            for _ in 0..200 {
                let mv = s.choose_move();
                assert!(ruleset.contains(mv));
                s.observe(Move::Rock, mv);
            }
            assert_eq!(s.predict(), None);
        }
    }

    #[test]
    fn test_random_covers_vocabulary() {
        let mut s = make(StrategyBase::Random, RuleSet::Rpsls, 3);
        let mut seen = Vec::new();
        for _ in 0..300 {
            let mv = s.choose_move();
            if !seen.contains(&mv) {
                seen.push(mv);
            }
        }
        assert_eq!(seen.len(), 5);
    }

    #[test]
    fn test_frequency_counters_repeated_rock() {
        for stream in 0..50 {
            let mut s = make(StrategyBase::Frequency, RuleSet::Rps, stream);
            for _ in 0..3 {
                s.observe(Move::Rock, Move::Rock);
            }
            assert_eq!(s.predict(), Some(Move::Rock));
            assert_eq!(s.choose_move(), Move::Paper);
        }
    }

    #[test]
    fn test_frequency_rpsls_picks_among_counters() {
        let mut s = make(StrategyBase::Frequency, RuleSet::Rpsls, 0);
        s.observe(Move::Rock, Move::Rock);
        for _ in 0..100 {
            let mv = s.choose_move();
            assert!(mv == Move::Paper || mv == Move::Spock, "got {}", mv);
        }
    }

    #[test]
    fn test_frequency_without_history_is_random() {
        let mut s = make(StrategyBase::Frequency, RuleSet::Rps, 0);
        assert_eq!(s.predict(), None);
        assert!(RuleSet::Rps.contains(s.choose_move()));
    }

    #[test]
    fn test_frequency_tie_break() {
        let mut s = make(StrategyBase::Frequency, RuleSet::Rps, 0);
        s.observe(Move::Paper, Move::Rock);
        s.observe(Move::Scissors, Move::Rock);
        assert_eq!(s.predict(), Some(Move::Paper));
    }

    #[test]
    fn test_markov_learns_transitions() {
        let mut s = make(StrategyBase::Markov, RuleSet::Rps, 0);
        for mv in [Move::Rock, Move::Paper, Move::Rock, Move::Paper, Move::Rock] {
            s.observe(mv, Move::Rock);
        }
        // rock has been followed by paper twice
        assert_eq!(s.predict(), Some(Move::Paper));
        assert_eq!(s.choose_move(), Move::Scissors);
    }

    #[test]
    fn test_markov_falls_back_to_frequency() {
        let mut s = make(StrategyBase::Markov, RuleSet::Rps, 0);
        assert_eq!(s.predict(), None);

        // a single observation has no transition yet
        s.observe(Move::Scissors, Move::Rock);
        assert_eq!(s.predict(), Some(Move::Scissors));
        assert_eq!(s.choose_move(), Move::Rock);
    }

    #[test]
    fn test_markov_unseen_predecessor_uses_frequency() {
        let mut s = make(StrategyBase::Markov, RuleSet::Rps, 0);
        s.observe(Move::Rock, Move::Rock);
        s.observe(Move::Rock, Move::Rock);
        s.observe(Move::Paper, Move::Rock);
        // nothing has followed paper yet; overall favourite is rock
        assert_eq!(s.predict(), Some(Move::Rock));
    }

    #[test]
    fn test_reset_clears_memory() {
        for base in [StrategyBase::Frequency, StrategyBase::Markov] {
            let mut s = make(base, RuleSet::Rps, 0);
            s.observe(Move::Rock, Move::Paper);
            s.observe(Move::Rock, Move::Paper);
            assert!(s.predict().is_some());
            s.reset();
            assert_eq!(s.predict(), None, "{:?} kept state after reset", base);
        }
    }

    #[test]
    fn test_strategy_keys() {
        assert_eq!(StrategyBase::from_key("markov"), Some(StrategyBase::Markov));
        assert_eq!(StrategyBase::from_key(" FREQ "), Some(StrategyBase::Frequency));
        assert_eq!(StrategyBase::from_key("frequency"), Some(StrategyBase::Frequency));
        assert_eq!(StrategyBase::from_key("minimax"), None);
        assert_eq!(StrategyBase::resolve_key("minimax"), StrategyBase::Random);
        for base in StrategyBase::ALL {
            assert_eq!(StrategyBase::from_key(base.key()), Some(base));
        }
    }

    #[test]
    fn test_player_names() {
        assert_eq!(StrategyBase::Random.player_name(), "RandomAI");
        assert_eq!(StrategyBase::Frequency.player_name(), "FrequencyAI");
        assert_eq!(StrategyBase::Markov.player_name(), "MarkovAI");
    }

    #[test]
    fn test_descriptions_are_distinct() {
        let descs: Vec<_> = StrategyBase::ALL.iter().map(|b| describe_strategy(*b)).collect();
        assert_ne!(descs[0], descs[1]);
        assert_ne!(descs[1], descs[2]);
    }
}
