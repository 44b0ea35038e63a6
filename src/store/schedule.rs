//! Daily Puzzle Rotation
//!
//! Maze levels are queued under `puzzles/upcoming/<date>`. Once a day the
//! scheduler promotes today's entry to `puzzles/current` and archives the
//! previous current puzzle under yesterday's date.

use chrono::NaiveDate;
use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

use crate::core::clock::Clock;
use crate::maze::level::{Level, LevelError};
use crate::store::{BlobStore, StoreError};

const CURRENT_KEY: &str = "puzzles/current";

/// Schedule errors.
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// Stored or submitted level is malformed.
    #[error("invalid puzzle: {0}")]
    InvalidLevel(#[from] LevelError),
    /// Backing store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Puzzle rotation over a blob store.
pub struct PuzzleSchedule<S: BlobStore, C: Clock> {
    store: S,
    clock: C,
}

impl<S: BlobStore, C: Clock> PuzzleSchedule<S, C> {
    /// Create a schedule.
    pub fn new(store: S, clock: C) -> Self {
        Self { store, clock }
    }

    /// Queue a level for `date`, replacing any level already queued.
    pub fn add_puzzle(&self, date: NaiveDate, level: &Level) -> Result<(), ScheduleError> {
        level.validate()?;
        let value = serde_json::to_value(level).map_err(StoreError::from)?;
        self.store.put(&upcoming_key(date), value)?;
        info!("Puzzle scheduled for {}", date);
        Ok(())
    }

    /// Level queued for `date`, if any.
    pub fn upcoming(&self, date: NaiveDate) -> Result<Option<Level>, ScheduleError> {
        self.load(&upcoming_key(date))
    }

    /// The live puzzle, if any.
    pub fn current(&self) -> Result<Option<Level>, ScheduleError> {
        self.load(CURRENT_KEY)
    }

    /// Puzzle that was live on `date`, if archived.
    pub fn archived(&self, date: NaiveDate) -> Result<Option<Level>, ScheduleError> {
        self.load(&archive_key(date))
    }

    /// Promote today's queued puzzle.
    ///
    /// Returns `false` and leaves everything untouched when nothing is
    /// queued for today.
    pub fn rotate(&self) -> Result<bool, ScheduleError> {
        let today = self.clock.today();
        let queued_key = upcoming_key(today);

        let Some(next) = self.store.get(&queued_key)? else {
            warn!("No puzzle scheduled for {}", today);
            return Ok(false);
        };

        if let Some(previous) = self.store.get(CURRENT_KEY)? {
            let yesterday = today.pred_opt().unwrap_or(today);
            self.store.put(&archive_key(yesterday), previous)?;
        }

        self.store.put(CURRENT_KEY, next)?;
        self.store.remove(&queued_key)?;
        info!("Rotated puzzle for {}", today);
        Ok(true)
    }

    fn load(&self, key: &str) -> Result<Option<Level>, ScheduleError> {
        self.store
            .get(key)?
            .map(parse_level)
            .transpose()
    }
}

fn parse_level(value: Value) -> Result<Level, ScheduleError> {
    let level: Level = serde_json::from_value(value).map_err(LevelError::from)?;
    level.validate()?;
    Ok(level)
}

fn upcoming_key(date: NaiveDate) -> String {
    format!("puzzles/upcoming/{}", date.format("%Y-%m-%d"))
}

fn archive_key(date: NaiveDate) -> String {
    format!("puzzles/archive/{}", date.format("%Y-%m-%d"))
}

// =============================================================================
// TESTS
// =============================================================================
