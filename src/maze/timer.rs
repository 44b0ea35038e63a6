//! Level Timer
//!
//! Per-level stopwatch. Reset and started on every level load, stopped
//! the moment both players reach their goals.

use std::time::Duration;
use chrono::{DateTime, Utc};
use serde::{Serialize, Deserialize};

/// Stopwatch plus the durations of every finished level.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct LevelTimer {
    started_at: Option<DateTime<Utc>>,
    running: bool,
    level_durations: Vec<Duration>,
}

impl LevelTimer {
    /// Create a stopped timer with no history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset and start.
    pub fn start(&mut self, now: DateTime<Utc>) {
        self.started_at = Some(now);
        self.running = true;
    }

    /// Stop and record the elapsed time.
    ///
    /// Returns `None` if the timer was not running, so a duplicate stop
    /// never records a level twice.
    pub fn stop(&mut self, now: DateTime<Utc>) -> Option<Duration> {
        if !self.running {
            return None;
        }
        self.running = false;
        let elapsed = self.elapsed(now);
        self.level_durations.push(elapsed);
        Some(elapsed)
    }

    /// Time since the last start. Zero if never started or if the clock
    /// went backwards.
    pub fn elapsed(&self, now: DateTime<Utc>) -> Duration {
        self.started_at
            .and_then(|start| (now - start).to_std().ok())
            .unwrap_or_default()
    }

    /// Is the stopwatch running.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Recorded durations, one per finished level, in completion order.
    pub fn level_durations(&self) -> &[Duration] {
        &self.level_durations
    }

    /// Sum of recorded durations.
    pub fn total(&self) -> Duration {
        self.level_durations.iter().sum()
    }

    /// Forget recorded durations (new run).
    pub fn clear_history(&mut self) {
        self.level_durations.clear();
    }
}
