//! Moves and rule sets

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RpsError;

/// A selectable hand shape
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Move {
    Rock,
    Paper,
    Scissors,
    Lizard,
    Spock,
}

impl Move {
    pub const ALL: [Move; 5] = [Move::Rock, Move::Paper, Move::Scissors, Move::Lizard, Move::Spock];

    pub fn as_str(&self) -> &'static str {
        match self {
            Move::Rock => "rock",
            Move::Paper => "paper",
            Move::Scissors => "scissors",
            Move::Lizard => "lizard",
            Move::Spock => "spock",
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses any known move name, regardless of rule set.
/// Use [`RuleSet::parse_move`] to also check membership.
impl FromStr for Move {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Move::ALL
            .iter()
            .copied()
            .find(|m| m.as_str() == needle)
            .ok_or_else(|| format!("unknown move `{}`", s.trim()))
    }
}

/// The two supported rule sets
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RuleSet {
    /// Rock, paper, scissors
    #[default]
    Rps,
    /// Rock, paper, scissors, lizard, spock
    Rpsls,
}

const RPS_MOVES: [Move; 3] = [Move::Rock, Move::Paper, Move::Scissors];
const RPSLS_MOVES: [Move; 5] = Move::ALL;

impl RuleSet {
    pub const ALL: [RuleSet; 2] = [RuleSet::Rps, RuleSet::Rpsls];

    /// Look up a rule set by its key ("RPS" / "RPSLS", any case)
    pub fn from_key(key: &str) -> Result<Self, RpsError> {
        match key.trim().to_ascii_uppercase().as_str() {
            "RPS" => Ok(RuleSet::Rps),
            "RPSLS" => Ok(RuleSet::Rpsls),
            _ => Err(RpsError::UnknownRuleSet(key.trim().to_string())),
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            RuleSet::Rps => "RPS",
            RuleSet::Rpsls => "RPSLS",
        }
    }

    /// The ordered move vocabulary
    pub fn moves(&self) -> &'static [Move] {
        match self {
            RuleSet::Rps => &RPS_MOVES,
            RuleSet::Rpsls => &RPSLS_MOVES,
        }
    }

    pub fn contains(&self, mv: Move) -> bool {
        self.moves().contains(&mv)
    }

    /// The moves that `mv` beats. Empty for moves outside the rule set.
    pub fn beaten_by(&self, mv: Move) -> &'static [Move] {
        match (self, mv) {
            (RuleSet::Rps, Move::Rock) => &[Move::Scissors],
            (RuleSet::Rps, Move::Paper) => &[Move::Rock],
            (RuleSet::Rps, Move::Scissors) => &[Move::Paper],
            (RuleSet::Rps, _) => &[],
            (RuleSet::Rpsls, Move::Rock) => &[Move::Scissors, Move::Lizard],
            (RuleSet::Rpsls, Move::Paper) => &[Move::Rock, Move::Spock],
            (RuleSet::Rpsls, Move::Scissors) => &[Move::Paper, Move::Lizard],
            (RuleSet::Rpsls, Move::Lizard) => &[Move::Spock, Move::Paper],
            (RuleSet::Rpsls, Move::Spock) => &[Move::Scissors, Move::Rock],
        }
    }

    /// True if `a` beats `b` under this rule set
    pub fn beats(&self, a: Move, b: Move) -> bool {
        self.beaten_by(a).contains(&b)
    }

    /// Moves that beat `predicted`, in vocabulary order
    pub fn counters(&self, predicted: Move) -> Vec<Move> {
        self.moves()
            .iter()
            .copied()
            .filter(|m| self.beats(*m, predicted))
            .collect()
    }

    /// Parse player input and check it belongs to this rule set
    pub fn parse_move(&self, input: &str) -> Result<Move, RpsError> {
        let mv: Move = input.parse().map_err(|_| RpsError::InvalidMove {
            mv: input.trim().to_string(),
            ruleset: *self,
        })?;
        if !self.contains(mv) {
            return Err(RpsError::invalid_move(mv, *self));
        }
        Ok(mv)
    }

    /// Check the beats-relation is irreflexive, anti-symmetric and closed
    /// over the vocabulary
    pub fn validate(&self) -> Result<(), RpsError> {
        let inconsistent = |reason: String| RpsError::InconsistentRules { ruleset: *self, reason };
        for &a in self.moves() {
            for &b in self.beaten_by(a) {
                if !self.contains(b) {
                    return Err(inconsistent(format!("{} beats {} outside the vocabulary", a, b)));
                }
                if a == b {
                    return Err(inconsistent(format!("{} beats itself", a)));
                }
                if self.beats(b, a) {
                    return Err(inconsistent(format!("{} and {} beat each other", a, b)));
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
