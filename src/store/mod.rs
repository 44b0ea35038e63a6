//! Persistence Boundary
//!
//! The puzzle cores never touch storage. The surrounding application
//! persists leaderboards and rotates daily puzzles through a key → JSON
//! blob store; the remote service behind it is not modelled here.
//!
//! - `leaderboard`: Per-day scores for each game
//! - `schedule`: Upcoming / current / archived daily puzzles

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};
use serde_json::Value;
use thiserror::Error;

pub mod leaderboard;
pub mod schedule;

pub use leaderboard::{Game, Leaderboard, LeaderboardError, ScoreEntry};
pub use schedule::{PuzzleSchedule, ScheduleError};

/// Storage errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Backend could not be reached or refused the request.
    #[error("store unavailable: {0}")]
    Unavailable(String),
    /// Value could not be converted to or from JSON.
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Key → JSON blob storage.
pub trait BlobStore: Send + Sync {
    /// Fetch a blob. `Ok(None)` if the key is absent.
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;

    /// Store a blob, replacing any previous value.
    fn put(&self, key: &str, value: Value) -> Result<(), StoreError>;

    /// Delete a blob, returning what was there.
    fn remove(&self, key: &str) -> Result<Option<Value>, StoreError>;
}

impl<S: BlobStore + ?Sized> BlobStore for Arc<S> {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        (**self).get(key)
    }

    fn put(&self, key: &str, value: Value) -> Result<(), StoreError> {
        (**self).put(key, value)
    }

    fn remove(&self, key: &str) -> Result<Option<Value>, StoreError> {
        (**self).remove(key)
    }
}

/// In-process store. Used by the demo binary and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    blobs: RwLock<BTreeMap<String, Value>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored keys, sorted.
    pub fn keys(&self) -> Vec<String> {
        self.blobs.read().unwrap_or_else(|e| e.into_inner()).keys().cloned().collect()
    }
}

impl BlobStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.blobs.read().unwrap_or_else(|e| e.into_inner()).get(key).cloned())
    }

    fn put(&self, key: &str, value: Value) -> Result<(), StoreError> {
        self.blobs.write().unwrap_or_else(|e| e.into_inner()).insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.blobs.write().unwrap_or_else(|e| e.into_inner()).remove(key))
    }
}
