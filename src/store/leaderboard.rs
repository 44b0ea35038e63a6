//! Daily Leaderboard
//!
//! One blob per game: `{ "YYYY-MM-DD": [entry, ...], ... }`. Entries are
//! ranked by moves, fewest first. Older deployments stored a flat array
//! of entries; that shape is upgraded into today's bucket on first touch.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Serialize, Deserialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{info, warn};

use crate::core::clock::Clock;
use crate::store::{BlobStore, StoreError};

/// Leaderboard errors.
#[derive(Debug, Error)]
pub enum LeaderboardError {
    /// Name missing or blank.
    #[error("player name is required")]
    InvalidName,
    /// Move count must be positive.
    #[error("moves must be greater than zero")]
    InvalidMoves,
    /// Unknown game name.
    #[error("invalid game specified: {0}")]
    UnknownGame(String),
    /// Backing store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Which puzzle a score belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Game {
    /// Mirror Maze (score = moves)
    #[serde(rename = "Mirror_Maze")]
    MirrorMaze,
    /// Code Breaker (score = guesses)
    #[serde(rename = "Code_Breaker")]
    CodeBreaker,
}

impl Game {
    /// Wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Game::MirrorMaze => "Mirror_Maze",
            Game::CodeBreaker => "Code_Breaker",
        }
    }

    /// Parse a wire name.
    pub fn parse(s: &str) -> Result<Self, LeaderboardError> {
        match s {
            "Mirror_Maze" => Ok(Game::MirrorMaze),
            "Code_Breaker" => Ok(Game::CodeBreaker),
            other => Err(LeaderboardError::UnknownGame(other.to_string())),
        }
    }

    fn store_key(&self) -> String {
        format!("leaderboard/{}", self.as_str())
    }
}

/// One submitted score.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    /// Player display name
    pub name: String,
    /// Moves (maze) or guesses (code breaker)
    pub moves: u32,
    /// Game played
    pub game: Game,
    /// Submission time
    pub timestamp: DateTime<Utc>,
}

/// Leaderboard service over a blob store.
pub struct Leaderboard<S: BlobStore, C: Clock> {
    store: S,
    clock: C,
}

impl<S: BlobStore, C: Clock> Leaderboard<S, C> {
    /// Create a leaderboard.
    pub fn new(store: S, clock: C) -> Self {
        Self { store, clock }
    }

    /// Today's entries for a game, fewest moves first.
    pub fn today(&self, game: Game) -> Result<Vec<ScoreEntry>, LeaderboardError> {
        let today = self.clock.today();
        let record = self.load_record(game, today)?;
        Ok(entries_for(&record, today, game))
    }

    /// Add a score and return today's ranking for that game.
    pub fn submit(&self, name: &str, moves: u32, game: Game) -> Result<Vec<ScoreEntry>, LeaderboardError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LeaderboardError::InvalidName);
        }
        if moves == 0 {
            return Err(LeaderboardError::InvalidMoves);
        }

        let now = self.clock.now();
        let today = now.date_naive();
        let mut record = self.load_record(game, today)?;

        let entry = ScoreEntry {
            name: name.to_string(),
            moves,
            game,
            timestamp: now,
        };
        let value = serde_json::to_value(&entry).map_err(StoreError::from)?;

        let bucket = record
            .entry(day_key(today))
            .or_insert_with(|| Value::Array(Vec::new()));
        if !bucket.is_array() {
            *bucket = Value::Array(Vec::new());
        }
        if let Value::Array(list) = bucket {
            list.push(value);
        }

        self.store.put(&game.store_key(), Value::Object(record.clone()))?;
        info!(
            "{} scored {} moves on {} at {}",
            entry.name,
            moves,
            game.as_str(),
            now.to_rfc3339_opts(SecondsFormat::Secs, true)
        );

        Ok(entries_for(&record, today, game))
    }

    fn load_record(&self, game: Game, today: NaiveDate) -> Result<Map<String, Value>, LeaderboardError> {
        let record = match self.store.get(&game.store_key())? {
            Some(Value::Object(map)) => map,
            Some(Value::Array(legacy)) => {
                warn!("Upgrading legacy {} leaderboard ({} entries)", game.as_str(), legacy.len());
                let mut map = Map::new();
                map.insert(day_key(today), Value::Array(legacy));
                map
            }
            _ => Map::new(),
        };
        Ok(record)
    }
}

fn day_key(day: NaiveDate) -> String {
    day.format("%Y-%m-%d").to_string()
}

/// Well-formed entries for `game` on `day`, stable-sorted by moves.
fn entries_for(record: &Map<String, Value>, day: NaiveDate, game: Game) -> Vec<ScoreEntry> {
    let mut entries: Vec<ScoreEntry> = record
        .get(&day_key(day))
        .and_then(Value::as_array)
        .map(|list| {
            list.iter()
                .filter_map(|v| serde_json::from_value::<ScoreEntry>(v.clone()).ok())
                .filter(|e| e.game == game)
                .collect()
        })
        .unwrap_or_default();

    entries.sort_by_key(|e| e.moves);
    entries
}

// =============================================================================
// TESTS
// =============================================================================
