//! Error types for the game core

use thiserror::Error;

use crate::rules::{Move, RuleSet};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RpsError {
    #[error("move `{mv}` is not part of the {ruleset} rule set")]
    InvalidMove { mv: String, ruleset: RuleSet },

    #[error("unknown rule set `{0}` (expected RPS or RPSLS)")]
    UnknownRuleSet(String),

    #[error("match is already over")]
    MatchOver,

    #[error("{ruleset} rules are inconsistent: {reason}")]
    InconsistentRules { ruleset: RuleSet, reason: String },
}

impl RpsError {
    pub(crate) fn invalid_move(mv: Move, ruleset: RuleSet) -> Self {
        RpsError::InvalidMove { mv: mv.to_string(), ruleset }
    }
}
