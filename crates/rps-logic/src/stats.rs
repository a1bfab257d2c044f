//! Player records and the persisted statistics store
//!
//! The store is a JSON object keyed by player name. It is loaded once at
//! session start and flushed after every mutation. A missing or unreadable
//! file is never fatal: the session simply starts from an empty store.

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::game::{MatchResult, RoundRecord};
use crate::rating::{updated_rating, DEFAULT_RATING};

/// One-time unlockable flags
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Achievement {
    #[serde(rename = "First Win")]
    FirstWin,
    #[serde(rename = "Three win streak")]
    ThreeWinStreak,
    #[serde(rename = "Predictable Player", alias = "Predictable Player (Cheater?)")]
    PredictablePlayer,
}

impl Achievement {
    pub fn label(&self) -> &'static str {
        match self {
            Achievement::FirstWin => "First Win",
            Achievement::ThreeWinStreak => "Three win streak",
            Achievement::PredictablePlayer => "Predictable Player",
        }
    }
}

impl fmt::Display for Achievement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A completed match as stored in a player's history
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub opponent: String,
    pub result: MatchResult,
    pub moves: Vec<RoundRecord>,
}

/// Persistent per-player statistics
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub rating: f64,
    pub total_games: u32,
    pub history: Vec<MatchSummary>,
    pub achievements: Vec<Achievement>,
}

impl Default for PlayerRecord {
    fn default() -> Self {
        Self {
            wins: 0,
            losses: 0,
            ties: 0,
            rating: DEFAULT_RATING,
            total_games: 0,
            history: Vec::new(),
            achievements: Vec::new(),
        }
    }
}

impl PlayerRecord {
    pub fn has_achievement(&self, achievement: Achievement) -> bool {
        self.achievements.contains(&achievement)
    }

    /// Add an achievement. Returns false if it was already unlocked.
    pub fn award(&mut self, achievement: Achievement) -> bool {
        if self.has_achievement(achievement) {
            return false;
        }
        self.achievements.push(achievement);
        true
    }

    fn apply_result(&mut self, opponent: &str, result: MatchResult, moves: &[RoundRecord]) {
        match result {
            MatchResult::Win => self.wins += 1,
            MatchResult::Loss => self.losses += 1,
            MatchResult::Tie => self.ties += 1,
        }
        self.total_games += 1;
        self.history.push(MatchSummary {
            opponent: opponent.to_string(),
            result,
            moves: moves.to_vec(),
        });
    }

    /// Achievements whose conditions hold right after `result` was applied.
    /// Includes ones already unlocked; [`award`](Self::award) filters those.
    fn earned(&self, result: MatchResult, moves: &[RoundRecord]) -> Vec<Achievement> {
        let mut earned = Vec::new();

        if result == MatchResult::Win && self.wins == 1 {
            earned.push(Achievement::FirstWin);
        }

        let recent = &self.history[self.history.len().saturating_sub(3)..];
        if recent.len() == 3 && recent.iter().all(|h| h.result == MatchResult::Win) {
            earned.push(Achievement::ThreeWinStreak);
        }

        if let Some(first) = moves.first() {
            if moves.len() >= 3 && moves.iter().all(|r| r.player_move == first.player_move) {
                earned.push(Achievement::PredictablePlayer);
            }
        }

        earned
    }
}

/// Outcome of [`StatsStore::record_match`]
#[derive(Clone, Debug, PartialEq)]
pub struct MatchReport {
    pub result: MatchResult,
    pub opponent_rating: f64,
    pub old_rating: f64,
    pub new_rating: f64,
    /// Achievements unlocked by this match only
    pub unlocked: Vec<Achievement>,
}

#[derive(Debug, Error)]
pub enum StatsError {
    #[error("failed to write stats file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to encode stats: {0}")]
    Json(#[from] serde_json::Error),
}

/// Player records keyed by name, backed by a JSON file
#[derive(Clone, Debug)]
pub struct StatsStore {
    path: PathBuf,
    records: BTreeMap<String, PlayerRecord>,
}

impl StatsStore {
    /// Load the store at `path`
    ///
    /// A missing file gives an empty store. So does an unreadable or
    /// malformed one, after logging a warning.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let records = match std::fs::read_to_string(&path) {
            Ok(text) => match serde_json::from_str(&text) {
                Ok(records) => records,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "stats file is malformed, starting empty");
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no stats file yet");
                BTreeMap::new()
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "stats file is unreadable, starting empty");
                BTreeMap::new()
            }
        };
        Self { path, records }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn records(&self) -> &BTreeMap<String, PlayerRecord> {
        &self.records
    }

    pub fn contains(&self, name: &str) -> bool {
        self.records.contains_key(name)
    }

    /// Look up a player without creating one
    pub fn get(&self, name: &str) -> Option<&PlayerRecord> {
        self.records.get(name)
    }

    /// Look up a player, creating a default record on first reference
    pub fn player(&mut self, name: &str) -> &mut PlayerRecord {
        self.records.entry(name.to_string()).or_default()
    }

    /// Stored rating for `name`, or the default if it has no record.
    ///
    /// AI opponents are looked up under their strategy name, so every human
    /// facing the same strategy shares one opponent rating.
    pub fn rating_of(&self, name: &str) -> f64 {
        self.get(name).map_or(DEFAULT_RATING, |r| r.rating)
    }

    /// Record a finished match for `player` and flush
    ///
    /// Counters, history, rating and achievements are all updated before the
    /// single write, so the file never holds one without the others.
    pub fn record_match(
        &mut self,
        player: &str,
        opponent: &str,
        result: MatchResult,
        moves: &[RoundRecord],
    ) -> Result<MatchReport, StatsError> {
        let opponent_rating = self.rating_of(opponent);
        let record = self.player(player);

        record.apply_result(opponent, result, moves);

        let old_rating = record.rating;
        record.rating = updated_rating(old_rating, opponent_rating, result);
        let new_rating = record.rating;

        let unlocked: Vec<Achievement> = record
            .earned(result, moves)
            .into_iter()
            .filter(|a| record.award(*a))
            .collect();

        info!(
            player,
            opponent,
            ?result,
            old_rating,
            new_rating,
            unlocked = unlocked.len(),
            "match recorded"
        );

        self.save()?;

        Ok(MatchReport {
            result,
            opponent_rating,
            old_rating,
            new_rating,
            unlocked,
        })
    }

    /// Award an achievement and flush if it is new
    pub fn award(&mut self, player: &str, achievement: Achievement) -> Result<bool, StatsError> {
        let added = self.player(player).award(achievement);
        if added {
            self.save()?;
        }
        Ok(added)
    }

    /// Restore a player's record to defaults and flush
    pub fn reset_player(&mut self, player: &str) -> Result<(), StatsError> {
        self.records.insert(player.to_string(), PlayerRecord::default());
        info!(player, "stats reset");
        self.save()
    }

    /// Up to `n` most recent matches, newest first
    pub fn recent_history(&self, player: &str, n: usize) -> Vec<&MatchSummary> {
        self.get(player)
            .map(|r| r.history.iter().rev().take(n).collect())
            .unwrap_or_default()
    }

    /// Write the store as pretty JSON
    ///
    /// The data goes to a sibling temp file first and is renamed over the
    /// target, so a crash mid-write leaves the previous file intact.
    pub fn save(&self) -> Result<(), StatsError> {
        let json = serde_json::to_string_pretty(&self.records)?;

        let mut tmp: OsString = self.path.as_os_str().to_owned();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        let io_err = |source: io::Error| StatsError::Io { path: self.path.clone(), source };
        std::fs::write(&tmp, json).map_err(io_err)?;
        if let Err(e) = std::fs::rename(&tmp, &self.path) {
            let _ = std::fs::remove_file(&tmp);
            return Err(io_err(e));
        }

        debug!(path = %self.path.display(), players = self.records.len(), "stats saved");
        Ok(())
    }
}
