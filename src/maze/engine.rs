//! Mirror Maze Engine
//!
//! Drives one play session through the level catalog:
//!
//! ```text
//! Loading ──load_level──▶ Playing ──win──▶ Won ──advance──▶ Loading[next] ─▶ Playing
//!                                   └──win on last level──▶ Completed
//! ```
//!
//! Every input is processed to completion before the next one, so the
//! engine needs no locking; it is owned by a single session.

use std::sync::Arc;
use std::time::Duration;
use chrono::{DateTime, Utc};
use serde::{Serialize, Deserialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::core::clock::Clock;
use crate::core::grid::Direction;
use crate::maze::events::MazeEvent;
use crate::maze::level::{Level, LevelCatalog};
use crate::maze::state::GameState;
use crate::maze::timer::LevelTimer;

/// Pause between winning a level and loading the next one.
pub const DEFAULT_ADVANCE_DELAY: Duration = Duration::from_secs(1);

/// Engine errors. All are mistakes by the caller, never player input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MazeError {
    /// Level index past the end of the catalog.
    #[error("level index {index} out of range (catalog has {len} levels)")]
    LevelOutOfRange {
        /// Requested index
        index: usize,
        /// Catalog length
        len: usize,
    },
    /// Operation needs a level in progress.
    #[error("no level in progress")]
    NotPlaying,
    /// Level is neither the current one nor the pending next one.
    #[error("level {index} cannot be loaded now (expected level {expected})")]
    OutOfOrder {
        /// Requested index
        index: usize,
        /// Only index loadable in the current phase
        expected: usize,
    },
    /// The run is over; only `start` begins a new one.
    #[error("run already completed")]
    RunCompleted,
}

/// Configuration for the maze engine.
#[derive(Debug, Clone)]
pub struct MazeConfig {
    /// Delay between a level win and the next level loading
    pub advance_delay: Duration,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            advance_delay: DEFAULT_ADVANCE_DELAY,
        }
    }
}

/// Current phase of the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[derive(Default)]
pub enum MazePhase {
    /// Before the first level is loaded
    #[default]
    Loading,
    /// Accepting moves
    Playing,
    /// Level won, next level pending
    Won {
        /// Index loaded by the next advance
        next_level: usize,
    },
    /// Final level won
    Completed {
        /// Sum of every level duration in the run
        total: Duration,
    },
}

/// Result of a single move attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Blocked (wall, edge, or no level in progress). Nothing changed.
    Rejected,
    /// Both players moved
    Moved,
    /// Both players reached their goals; more levels remain
    LevelWon {
        /// Level just won
        level_index: usize,
        /// Time spent on it
        elapsed: Duration,
        /// Level pending after the delay
        next_level: usize,
    },
    /// Final level won
    Completed {
        /// Sum of every level duration in the run
        total: Duration,
    },
}

impl MoveOutcome {
    /// Did the players move.
    pub fn is_accepted(&self) -> bool {
        !matches!(self, MoveOutcome::Rejected)
    }
}

/// A Mirror Maze play session.
pub struct MazeEngine<C: Clock> {
    catalog: Arc<LevelCatalog>,
    clock: C,
    config: MazeConfig,
    state: GameState,
    timer: LevelTimer,
    phase: MazePhase,
    total_moves: u32,
    won_at: Option<DateTime<Utc>>,
    pending_events: Vec<MazeEvent>,
}

impl<C: Clock> MazeEngine<C> {
    /// Create a session. Starts in `Loading` with level 0 staged but the
    /// timer stopped; call [`start`](Self::start) to begin.
    pub fn new(catalog: Arc<LevelCatalog>, clock: C, config: MazeConfig) -> Self {
        let state = GameState::from_level(0, catalog.first());
        Self {
            catalog,
            clock,
            config,
            state,
            timer: LevelTimer::new(),
            phase: MazePhase::Loading,
            total_moves: 0,
            won_at: None,
            pending_events: Vec::new(),
        }
    }

    /// Begin a fresh run from level 0.
    pub fn start(&mut self) -> Result<&GameState, MazeError> {
        self.timer.clear_history();
        self.total_moves = 0;
        self.enter_level(0)
    }

    /// Load a level: copy it into fresh state, reset and start the timer.
    ///
    /// Only the level in progress (or staged, before `start`) and the
    /// pending next level after a win can be loaded, so no level is ever
    /// recorded twice in one run. Once the run is `Completed`, use
    /// [`start`](Self::start). Rejected calls touch nothing.
    pub fn load_level(&mut self, index: usize) -> Result<&GameState, MazeError> {
        self.check_index(index)?;
        let expected = match self.phase {
            MazePhase::Loading | MazePhase::Playing => self.state.level_index,
            MazePhase::Won { next_level } => next_level,
            MazePhase::Completed { .. } => return Err(MazeError::RunCompleted),
        };
        if index != expected {
            return Err(MazeError::OutOfOrder { index, expected });
        }
        self.enter_level(index)
    }

    fn check_index(&self, index: usize) -> Result<(), MazeError> {
        if index < self.catalog.len() {
            Ok(())
        } else {
            Err(MazeError::LevelOutOfRange { index, len: self.catalog.len() })
        }
    }

    fn enter_level(&mut self, index: usize) -> Result<&GameState, MazeError> {
        let level = self.catalog.get(index).ok_or(MazeError::LevelOutOfRange {
            index,
            len: self.catalog.len(),
        })?;

        self.phase = MazePhase::Loading;
        self.state = GameState::from_level(index, level);
        self.won_at = None;
        self.timer.start(self.clock.now());
        self.phase = MazePhase::Playing;

        debug!("Loaded level {} ({}x{})", index + 1, self.state.width, self.state.height);
        self.push_event(MazeEvent::LevelLoaded { level_index: index });

        Ok(&self.state)
    }

    /// Reload the level in progress from its starting layout.
    pub fn restart_level(&mut self) -> Result<&GameState, MazeError> {
        if self.phase != MazePhase::Playing {
            return Err(MazeError::NotPlaying);
        }
        self.enter_level(self.state.level_index)
    }

    /// Try to move player 1 in `direction` and player 2 the opposite way.
    ///
    /// Both move or neither does.
    pub fn attempt_move(&mut self, direction: Direction) -> MoveOutcome {
        if self.phase != MazePhase::Playing {
            return MoveOutcome::Rejected;
        }

        if !self.state.try_move(direction) {
            #[cfg(feature = "debug-tracing")]
            tracing::trace!(
                "Move {:?} blocked: p1 {} p2 {}",
                direction, self.state.player1, self.state.player2
            );
            return MoveOutcome::Rejected;
        }

        self.total_moves += 1;
        self.push_event(MazeEvent::PlayersMoved {
            direction,
            player1: self.state.player1,
            player2: self.state.player2,
            moves: self.state.moves,
        });

        self.check_win_condition().unwrap_or(MoveOutcome::Moved)
    }

    /// Check for a win and settle it.
    ///
    /// Returns `None` unless a level is in progress and both players stand
    /// on their own goals. Fires at most once per level.
    pub fn check_win_condition(&mut self) -> Option<MoveOutcome> {
        if self.phase != MazePhase::Playing || !self.state.is_won() {
            return None;
        }

        let now = self.clock.now();
        let elapsed = self.timer.stop(now).unwrap_or_default();
        let level_index = self.state.level_index;

        info!(
            "Level {} completed in {:.2}s ({} moves)",
            level_index + 1,
            elapsed.as_secs_f64(),
            self.state.moves
        );
        self.push_event(MazeEvent::LevelWon {
            level_index,
            elapsed,
            moves: self.state.moves,
        });

        let next_level = level_index + 1;
        if next_level < self.catalog.len() {
            self.phase = MazePhase::Won { next_level };
            self.won_at = Some(now);
            return Some(MoveOutcome::LevelWon { level_index, elapsed, next_level });
        }

        let total = self.timer.total();
        self.phase = MazePhase::Completed { total };
        info!("All {} levels completed! Total time: {:.2}s", self.catalog.len(), total.as_secs_f64());
        self.push_event(MazeEvent::GameCompleted {
            total,
            total_moves: self.total_moves,
        });

        Some(MoveOutcome::Completed { total })
    }

    /// Load the pending next level now, skipping the delay.
    ///
    /// Returns `Ok(false)` when no level is pending.
    pub fn advance(&mut self) -> Result<bool, MazeError> {
        match self.phase {
            MazePhase::Won { next_level } => {
                self.enter_level(next_level)?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Load the pending next level once the advance delay has passed.
    ///
    /// Meant to be called from the render loop every frame.
    pub fn poll(&mut self) -> Result<bool, MazeError> {
        let due = match (self.phase, self.won_at) {
            (MazePhase::Won { .. }, Some(won_at)) => {
                let waited = (self.clock.now() - won_at).to_std().unwrap_or_default();
                waited >= self.config.advance_delay
            }
            _ => false,
        };

        if due {
            self.advance()
        } else {
            Ok(false)
        }
    }

    /// Current phase.
    pub fn phase(&self) -> MazePhase {
        self.phase
    }

    /// Current state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Level definition being played.
    pub fn current_level(&self) -> &Level {
        // level_index only ever comes from a successful catalog lookup
        self.catalog.get(self.state.level_index).unwrap_or_else(|| self.catalog.first())
    }

    /// Number of levels in the session.
    pub fn level_count(&self) -> usize {
        self.catalog.len()
    }

    /// Live time on the current level (for the on-screen timer).
    ///
    /// Frozen at the recorded value once the level is won.
    pub fn elapsed(&self) -> Duration {
        if self.timer.is_running() {
            self.timer.elapsed(self.clock.now())
        } else {
            self.timer.level_durations().last().copied().unwrap_or_default()
        }
    }

    /// Durations of every level won this run.
    pub fn level_durations(&self) -> &[Duration] {
        self.timer.level_durations()
    }

    /// Sum of recorded level durations.
    pub fn total_elapsed(&self) -> Duration {
        self.timer.total()
    }

    /// Successful moves across the run.
    pub fn total_moves(&self) -> u32 {
        self.total_moves
    }

    /// Take pending events (consumes them).
    pub fn take_events(&mut self) -> Vec<MazeEvent> {
        std::mem::take(&mut self.pending_events)
    }

    fn push_event(&mut self, event: MazeEvent) {
        self.pending_events.push(event);
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use chrono::TimeZone;
    use crate::core::clock::ManualClock;
    use crate::core::grid::GridPos;
    use crate::maze::solver::solve;

    const LEVEL_ONE_SOLUTION: [Direction; 7] = [
        Direction::Up,
        Direction::Right,
        Direction::Right,
        Direction::Right,
        Direction::Down,
        Direction::Right,
        Direction::Right,
    ];

    fn clock() -> Arc<ManualClock> {
        Arc::new(ManualClock::new(Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap()))
    }

    fn engine(clock: &Arc<ManualClock>) -> MazeEngine<Arc<ManualClock>> {
        MazeEngine::new(Arc::new(LevelCatalog::builtin()), Arc::clone(clock), MazeConfig::default())
    }

    /// 4x1 strip where stepping left puts each player on the other's goal.
    fn strip_catalog() -> LevelCatalog {
        LevelCatalog::new(vec![Level {
            width: 4,
            height: 1,
            player1_start: GridPos::new(1, 0),
            player2_start: GridPos::new(2, 0),
            goal1: GridPos::new(3, 0),
            goal2: GridPos::new(0, 0),
            walls: BTreeSet::new(),
        }])
        .unwrap()
    }

    #[test]
    fn test_starts_in_loading() {
        let clock = clock();
        let mut engine = engine(&clock);
        assert_eq!(engine.phase(), MazePhase::Loading);
        assert_eq!(engine.attempt_move(Direction::Right), MoveOutcome::Rejected);

        engine.start().unwrap();
        assert_eq!(engine.phase(), MazePhase::Playing);
        assert_eq!(engine.state().player1, GridPos::new(1, 1));
        assert_eq!(engine.state().player2, GridPos::new(6, 6));
    }

    #[test]
    fn test_load_level_out_of_range() {
        let clock = clock();
        let mut engine = engine(&clock);
        engine.start().unwrap();
        engine.attempt_move(Direction::Up);
        let before = engine.state().clone();

        assert_eq!(
            engine.load_level(5).unwrap_err(),
            MazeError::LevelOutOfRange { index: 5, len: 5 }
        );
        assert_eq!(engine.state(), &before);
        assert_eq!(engine.phase(), MazePhase::Playing);
    }

    #[test]
    fn test_level_one_solution_wins() {
        let clock = clock();
        let mut engine = engine(&clock);
        engine.start().unwrap();

        let mut last = MoveOutcome::Rejected;
        for dir in LEVEL_ONE_SOLUTION {
            clock.advance(Duration::from_secs(1));
            last = engine.attempt_move(dir);
        }

        assert_eq!(
            last,
            MoveOutcome::LevelWon {
                level_index: 0,
                elapsed: Duration::from_secs(7),
                next_level: 1,
            }
        );
        assert_eq!(engine.phase(), MazePhase::Won { next_level: 1 });
        assert_eq!(engine.level_durations(), &[Duration::from_secs(7)]);
        assert_eq!(engine.state().moves, 7);

        // Moves are ignored while the next level is pending
        assert_eq!(engine.attempt_move(Direction::Left), MoveOutcome::Rejected);
        // Timer display is frozen
        clock.advance(Duration::from_millis(300));
        assert_eq!(engine.elapsed(), Duration::from_secs(7));
    }

    #[test]
    fn test_rejected_move_changes_nothing() {
        let clock = clock();
        let mut engine = engine(&clock);
        engine.start().unwrap();
        engine.take_events();

        // First Up: (1,1)->(1,0) and (6,6)->(6,7). Second Up leaves the grid.
        assert!(engine.attempt_move(Direction::Up).is_accepted());
        let before = engine.state().clone();
        assert_eq!(engine.attempt_move(Direction::Up), MoveOutcome::Rejected);
        assert_eq!(engine.state(), &before);
        assert_eq!(engine.total_moves(), 1);

        let events = engine.take_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind(), "players_moved");
    }

    #[test]
    fn test_swapped_goals_do_not_win() {
        let clock = clock();
        let mut engine = MazeEngine::new(Arc::new(strip_catalog()), Arc::clone(&clock), MazeConfig::default());
        engine.start().unwrap();

        assert_eq!(engine.attempt_move(Direction::Left), MoveOutcome::Moved);
        assert_eq!(engine.state().player1, engine.state().goal2);
        assert_eq!(engine.state().player2, engine.state().goal1);
        assert_eq!(engine.phase(), MazePhase::Playing);
        assert_eq!(engine.check_win_condition(), None);

        assert_eq!(engine.attempt_move(Direction::Right), MoveOutcome::Moved);
        assert_eq!(engine.attempt_move(Direction::Right), MoveOutcome::Moved);
        assert!(matches!(engine.attempt_move(Direction::Right), MoveOutcome::Completed { .. }));
    }

    #[test]
    fn test_poll_waits_for_delay() {
        let clock = clock();
        let mut engine = engine(&clock);
        engine.start().unwrap();
        for dir in LEVEL_ONE_SOLUTION {
            engine.attempt_move(dir);
        }

        clock.advance(Duration::from_millis(999));
        assert_eq!(engine.poll(), Ok(false));
        assert_eq!(engine.phase(), MazePhase::Won { next_level: 1 });

        clock.advance(Duration::from_millis(1));
        assert_eq!(engine.poll(), Ok(true));
        assert_eq!(engine.phase(), MazePhase::Playing);
        assert_eq!(engine.state().level_index, 1);
        assert_eq!(engine.state().player2, GridPos::new(8, 8));
        assert_eq!(engine.state().moves, 0);
    }

    #[test]
    fn test_restart_level() {
        let clock = clock();
        let mut engine = engine(&clock);
        engine.start().unwrap();
        engine.attempt_move(Direction::Up);
        clock.advance(Duration::from_secs(5));

        engine.restart_level().unwrap();
        assert_eq!(engine.state().player1, GridPos::new(1, 1));
        assert_eq!(engine.state().moves, 0);
        assert_eq!(engine.elapsed(), Duration::ZERO);
        // Run-wide counter keeps the moves already made
        assert_eq!(engine.total_moves(), 1);
    }

    #[test]
    fn test_restart_needs_level_in_progress() {
        let clock = clock();
        let mut engine = engine(&clock);
        assert_eq!(engine.restart_level().unwrap_err(), MazeError::NotPlaying);
    }

    #[test]
    fn test_full_run_completes_once() {
        let clock = clock();
        let mut engine = engine(&clock);
        engine.start().unwrap();

        let mut expected_total = Duration::ZERO;
        let mut completions = 0;

        for index in 0..engine.level_count() {
            let solution = solve(engine.current_level()).unwrap();
            let per_move = Duration::from_millis(250);

            for dir in solution.iter().copied() {
                clock.advance(per_move);
                match engine.attempt_move(dir) {
                    MoveOutcome::Rejected => panic!("solver move rejected on level {}", index),
                    MoveOutcome::Completed { total } => {
                        completions += 1;
                        assert_eq!(total, engine.total_elapsed());
                    }
                    _ => {}
                }
            }
            expected_total += per_move * solution.len() as u32;

            clock.advance(DEFAULT_ADVANCE_DELAY);
            engine.poll().unwrap();
        }

        assert_eq!(completions, 1);
        assert_eq!(engine.phase(), MazePhase::Completed { total: expected_total });
        assert_eq!(engine.level_durations().len(), 5);
        assert_eq!(engine.total_elapsed(), expected_total);

        // Terminal: no more moves, no second completion
        assert_eq!(engine.attempt_move(Direction::Left), MoveOutcome::Rejected);
        assert_eq!(engine.check_win_condition(), None);
        assert_eq!(engine.advance(), Ok(false));

        let events = engine.take_events();
        let completed: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, MazeEvent::GameCompleted { .. }))
            .collect();
        assert_eq!(completed.len(), 1);
    }

    #[test]
    fn test_completed_run_cannot_be_reloaded() {
        let clock = clock();
        let mut engine = MazeEngine::new(Arc::new(strip_catalog()), Arc::clone(&clock), MazeConfig::default());
        engine.start().unwrap();
        for _ in 0..2 {
            clock.advance(Duration::from_millis(1500));
            engine.attempt_move(Direction::Right);
        }
        let total = Duration::from_secs(3);
        assert_eq!(engine.phase(), MazePhase::Completed { total });

        assert_eq!(engine.load_level(0).unwrap_err(), MazeError::RunCompleted);
        assert_eq!(engine.phase(), MazePhase::Completed { total });
        assert_eq!(engine.attempt_move(Direction::Left), MoveOutcome::Rejected);
        assert_eq!(engine.level_durations(), &[total]);

        let completed = engine
            .take_events()
            .into_iter()
            .filter(|e| matches!(e, MazeEvent::GameCompleted { .. }))
            .count();
        assert_eq!(completed, 1);
    }

    #[test]
    fn test_won_level_cannot_be_replayed() {
        let clock = clock();
        let mut engine = engine(&clock);
        engine.start().unwrap();
        for dir in LEVEL_ONE_SOLUTION {
            clock.advance(Duration::from_secs(1));
            engine.attempt_move(dir);
        }
        assert_eq!(engine.phase(), MazePhase::Won { next_level: 1 });

        assert_eq!(
            engine.load_level(0).unwrap_err(),
            MazeError::OutOfOrder { index: 0, expected: 1 }
        );
        assert_eq!(
            engine.load_level(3).unwrap_err(),
            MazeError::OutOfOrder { index: 3, expected: 1 }
        );
        assert_eq!(engine.phase(), MazePhase::Won { next_level: 1 });
        assert_eq!(engine.level_durations(), &[Duration::from_secs(7)]);

        // The pending level loads without waiting for the delay
        engine.load_level(1).unwrap();
        assert_eq!(engine.phase(), MazePhase::Playing);
        assert_eq!(engine.state().level_index, 1);

        // Mid-level, only the current level reloads
        assert_eq!(
            engine.load_level(0).unwrap_err(),
            MazeError::OutOfOrder { index: 0, expected: 1 }
        );
        engine.load_level(1).unwrap();
        assert_eq!(engine.level_durations(), &[Duration::from_secs(7)]);
    }

    #[test]
    fn test_start_resets_run() {
        let clock = clock();
        let mut engine = MazeEngine::new(Arc::new(strip_catalog()), Arc::clone(&clock), MazeConfig::default());
        engine.start().unwrap();
        for _ in 0..2 {
            engine.attempt_move(Direction::Right);
        }
        assert!(matches!(engine.phase(), MazePhase::Completed { .. }));

        engine.start().unwrap();
        assert_eq!(engine.phase(), MazePhase::Playing);
        assert!(engine.level_durations().is_empty());
        assert_eq!(engine.total_moves(), 0);
    }
}
