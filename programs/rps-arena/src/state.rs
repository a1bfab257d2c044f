//! Configuration and session state

use std::path::PathBuf;

use clap::Parser;
use rps_logic::{RuleSet, SeededRng, StatsStore, StrategyBase};
use tracing::Level;

use crate::error::ConfigError;

/// Default statistics file, relative to the working directory
pub const STATS_FILE: &str = "rps_stats.json";

/// Name used when the player just presses enter
pub const DEFAULT_PLAYER_NAME: &str = "Player";

/// Default best-of length offered at the rounds prompt
pub const DEFAULT_ROUNDS: u32 = 3;

/// Rounds played by the AI-vs-AI demo
pub const DEMO_ROUNDS: u32 = 50;

/// Matches listed on the stats screen
pub const HISTORY_SHOWN: usize = 5;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Rock-Paper-Scissors(-Lizard-Spock) against adaptive AI opponents")]
pub struct Args {
    /// Player name; prompted for when omitted
    #[arg(short, long)]
    pub name: Option<String>,

    /// JSON file holding every player's statistics
    #[arg(long, default_value = STATS_FILE)]
    pub stats_file: PathBuf,

    /// Seed for the opponents' randomness; drawn from the OS when omitted
    #[arg(long)]
    pub seed: Option<u64>,

    /// trace, debug, info, warn or error. Logs go to stderr.
    #[arg(long, default_value = "warn")]
    pub log_level: String,

    /// Default best-of length
    #[arg(long, default_value_t = DEFAULT_ROUNDS)]
    pub rounds: u32,

    /// Default opponent: random, freq or markov
    #[arg(long, default_value = "markov")]
    pub opponent: String,

    /// Default rule set: RPS or RPSLS
    #[arg(long, default_value = "RPS")]
    pub ruleset: String,
}

/// Validated configuration
#[derive(Clone, Debug)]
pub struct ArenaConfig {
    pub player_name: Option<String>,
    pub stats_path: PathBuf,
    pub seed: Option<u64>,
    pub log_level: Level,
    pub default_rounds: u32,
    pub default_opponent: StrategyBase,
    pub default_ruleset: RuleSet,
}

impl ArenaConfig {
    pub fn from_args(args: Args) -> Result<Self, ConfigError> {
        let log_level = args
            .log_level
            .parse::<Level>()
            .map_err(|_| ConfigError::InvalidLogLevel { value: args.log_level.clone() })?;

        let default_ruleset = RuleSet::from_key(&args.ruleset)
            .map_err(|_| ConfigError::InvalidRuleSet { value: args.ruleset.clone() })?;

        if args.rounds == 0 {
            return Err(ConfigError::InvalidNonZero { field: "rounds", value: args.rounds });
        }

        let player_name = match args.name {
            Some(name) if name.trim().is_empty() => return Err(ConfigError::EmptyName),
            Some(name) => Some(name.trim().to_string()),
            None => None,
        };

        Ok(Self {
            player_name,
            stats_path: args.stats_file,
            seed: args.seed,
            log_level,
            default_rounds: args.rounds,
            default_opponent: StrategyBase::resolve_key(&args.opponent),
            default_ruleset,
        })
    }
}

/// Everything one console session carries between menu choices
pub struct Session {
    pub config: ArenaConfig,
    pub stats: StatsStore,
    pub player_name: String,
    pub ruleset: RuleSet,
    seed: [u8; 32],
    streams_used: u32,
}

impl Session {
    pub fn new(config: ArenaConfig, stats: StatsStore, player_name: String) -> Self {
        let seed = match config.seed {
            Some(seed) => {
                let mut bytes = [0u8; 32];
                bytes[..8].copy_from_slice(&seed.to_le_bytes());
                bytes
            }
            None => rand::random(),
        };
        Self {
            ruleset: config.default_ruleset,
            config,
            stats,
            player_name,
            seed,
            streams_used: 0,
        }
    }

    /// A fresh random stream for the next match or demo
    pub fn next_rng(&mut self) -> SeededRng {
        let rng = SeededRng::new(&self.seed, self.streams_used);
        self.streams_used += 1;
        rng
    }

    pub fn seed(&self) -> &[u8; 32] {
        &self.seed
    }
}
