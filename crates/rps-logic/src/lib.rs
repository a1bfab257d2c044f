//! Match Logic for RPS Arena
//!
//! Core game logic for Rock-Paper-Scissors(-Lizard-Spock) against adaptive
//! opponents, plus the persisted player statistics.
//! This crate is compiled to:
//! - Native (for the console arena)
//! - WASM (for a browser front end)

mod error;
mod random;
mod rules;
mod outcome;
mod strategy;
mod game;
mod rating;
mod stats;

#[cfg(feature = "wasm")]
mod wasm;

pub use error::RpsError;
pub use random::SeededRng;
pub use rules::{Move, RuleSet};
pub use outcome::{resolve, try_resolve, Outcome};
pub use strategy::{describe_strategy, Strategy, StrategyBase, Tally};
pub use game::{
    normalize_rounds, run_exhibition, ExhibitionResult, ExhibitionRound, Match, MatchResult,
    RoundRecord, RoundReport, Score,
};
pub use rating::{expected_score, updated_rating, DEFAULT_RATING, ELO_K};
pub use stats::{Achievement, MatchReport, MatchSummary, PlayerRecord, StatsError, StatsStore};
