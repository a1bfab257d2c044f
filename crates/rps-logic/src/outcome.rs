//! Round outcome resolution

use serde::{Deserialize, Serialize};

use crate::error::RpsError;
use crate::rules::{Move, RuleSet};

/// Result of one round, from the first mover's perspective
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    WinA,
    WinB,
    Tie,
}

impl Outcome {
    /// Same round seen from the other side
    pub fn flip(self) -> Self {
        match self {
            Outcome::WinA => Outcome::WinB,
            Outcome::WinB => Outcome::WinA,
            Outcome::Tie => Outcome::Tie,
        }
    }
}

/// Resolve a round between `a` and `b`.
///
/// # Panics
/// If either move is outside `ruleset`. Submitting such a move is a caller
/// bug; use [`try_resolve`] to check instead.
pub fn resolve(a: Move, b: Move, ruleset: RuleSet) -> Outcome {
    match try_resolve(a, b, ruleset) {
        Ok(outcome) => outcome,
        Err(e) => panic!("{}", e),
    }
}

/// Checked variant of [`resolve`]
pub fn try_resolve(a: Move, b: Move, ruleset: RuleSet) -> Result<Outcome, RpsError> {
    for mv in [a, b] {
        if !ruleset.contains(mv) {
            return Err(RpsError::invalid_move(mv, ruleset));
        }
    }

    Ok(if a == b {
        Outcome::Tie
    } else if ruleset.beats(a, b) {
        Outcome::WinA
    } else {
        Outcome::WinB
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_rps_examples() {
        assert_eq!(resolve(Move::Rock, Move::Scissors, RuleSet::Rps), Outcome::WinA);
        assert_eq!(resolve(Move::Rock, Move::Paper, RuleSet::Rps), Outcome::WinB);
        assert_eq!(resolve(Move::Paper, Move::Paper, RuleSet::Rps), Outcome::Tie);
    }

    #[test]
    fn test_rpsls_examples() {
        assert_eq!(resolve(Move::Spock, Move::Rock, RuleSet::Rpsls), Outcome::WinA);
        assert_eq!(resolve(Move::Lizard, Move::Spock, RuleSet::Rpsls), Outcome::WinA);
        assert_eq!(resolve(Move::Lizard, Move::Rock, RuleSet::Rpsls), Outcome::WinB);
        assert_eq!(resolve(Move::Scissors, Move::Lizard, RuleSet::Rpsls), Outcome::WinA);
    }

    #[test]
    fn test_try_resolve_rejects_foreign_moves() {
        let err = try_resolve(Move::Lizard, Move::Rock, RuleSet::Rps).unwrap_err();
        assert_eq!(
            err,
            RpsError::InvalidMove { mv: "lizard".to_string(), ruleset: RuleSet::Rps }
        );
        assert!(try_resolve(Move::Rock, Move::Spock, RuleSet::Rps).is_err());
    }

    #[test]
    #[should_panic(expected = "not part of the RPS rule set")]
    fn test_resolve_panics_on_foreign_move() {
        resolve(Move::Spock, Move::Rock, RuleSet::Rps);
    }

    #[test]
    fn test_flip() {
        assert_eq!(Outcome::WinA.flip(), Outcome::WinB);
        assert_eq!(Outcome::WinB.flip(), Outcome::WinA);
        assert_eq!(Outcome::Tie.flip(), Outcome::Tie);
    }

    fn ruleset_and_pair() -> impl Strategy<Value = (RuleSet, Move, Move)> {
        prop_oneof![Just(RuleSet::Rps), Just(RuleSet::Rpsls)].prop_flat_map(|rs| {
            let moves = rs.moves().to_vec();
            (
                Just(rs),
                proptest::sample::select(moves.clone()),
                proptest::sample::select(moves),
            )
        })
    }

    proptest! {
        #[test]
        fn prop_same_move_ties((rs, a, _b) in ruleset_and_pair()) {
            prop_assert_eq!(resolve(a, a, rs), Outcome::Tie);
        }

        #[test]
        fn prop_outcome_is_antisymmetric((rs, a, b) in ruleset_and_pair()) {
            prop_assert_eq!(resolve(a, b, rs), resolve(b, a, rs).flip());
            if a != b {
                prop_assert_ne!(resolve(a, b, rs), Outcome::Tie);
            }
        }
    }
}
