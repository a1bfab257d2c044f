//! Error types for the console arena

use std::io;

use rps_logic::{RpsError, StatsError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArenaError {
    #[error("console I/O failed: {0}")]
    Console(#[from] io::Error),

    #[error(transparent)]
    Stats(#[from] StatsError),

    #[error(transparent)]
    Game(#[from] RpsError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ArenaError {
    /// Errors the menu loop can report and carry on from
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ArenaError::Stats(_))
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid log level: {value}")]
    InvalidLogLevel { value: String },

    #[error("invalid rule set: {value} (expected RPS or RPSLS)")]
    InvalidRuleSet { value: String },

    #[error("{field} must be > 0 (got {value})")]
    InvalidNonZero { field: &'static str, value: u32 },

    #[error("player name must not be empty")]
    EmptyName,
}
