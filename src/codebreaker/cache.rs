//! Daily Code Cache
//!
//! Process-wide memo of today's code. The value is an immutable snapshot
//! per UTC day: the first request after a date rollover recomputes it
//! under the lock, every other request reads the snapshot.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use chrono::NaiveDate;
use tracing::debug;

use crate::core::clock::Clock;
use crate::codebreaker::code::{generate_daily_code, DailyCode};
use crate::codebreaker::guess::{check_guess, GuessError, GuessPolicy, GuessResult};

/// The cached code and the day it belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CachedCode {
    /// UTC day
    pub day: NaiveDate,
    /// Code for that day
    pub code: DailyCode,
}

/// Lazily refreshed per-day code.
pub struct DailyCodeCache<C: Clock> {
    clock: C,
    cached: Mutex<Option<CachedCode>>,
    recomputations: AtomicUsize,
}

impl<C: Clock> DailyCodeCache<C> {
    /// Create an empty cache.
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            cached: Mutex::new(None),
            recomputations: AtomicUsize::new(0),
        }
    }

    /// Today's code (UTC day from the clock).
    pub fn today(&self) -> CachedCode {
        let mut cached = self.cached.lock().unwrap_or_else(|e| e.into_inner());
        // Day is read under the lock; the cache only ever moves forward
        let day = self.clock.today();
        match *cached {
            Some(entry) if entry.day == day => entry,
            _ => {
                let entry = CachedCode { day, code: generate_daily_code(day) };
                *cached = Some(entry);
                self.recomputations.fetch_add(1, Ordering::Relaxed);
                debug!("Daily code recomputed for {}", day);
                entry
            }
        }
    }

    /// Validate and score a guess against today's code.
    pub fn check(&self, input: &str, policy: &GuessPolicy) -> Result<GuessResult, GuessError> {
        let CachedCode { code, .. } = self.today();
        check_guess(input, &code, policy)
    }

    /// How many times the code has been (re)computed.
    pub fn recomputations(&self) -> usize {
        self.recomputations.load(Ordering::Relaxed)
    }
}
