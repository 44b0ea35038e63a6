//! # Daily Puzzles
//!
//! Game cores for two daily puzzles: Mirror Maze and Code Breaker.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       DAILY PUZZLES                          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Shared primitives                         │
//! │  ├── grid.rs     - Grid positions and directions             │
//! │  ├── rng.rs      - MINSTD Lehmer generator                   │
//! │  ├── clock.rs    - Injectable wall clock                     │
//! │  └── hash.rs     - State digests                             │
//! │                                                              │
//! │  maze/           - Mirror Maze (deterministic)               │
//! │  ├── level.rs    - Level records and catalog                 │
//! │  ├── state.rs    - Mirrored movement and win detection       │
//! │  ├── timer.rs    - Per-level timing                          │
//! │  ├── engine.rs   - Session phases and level progression      │
//! │  ├── events.rs   - Engine events                             │
//! │  ├── solver.rs   - Shortest solution search                  │
//! │  └── replay.rs   - Move-log replay and digests               │
//! │                                                              │
//! │  codebreaker/    - Code Breaker (deterministic)              │
//! │  ├── code.rs     - Daily code from the date                  │
//! │  ├── guess.rs    - Guess validation and scoring              │
//! │  └── cache.rs    - Per-day memo                              │
//! │                                                              │
//! │  store/          - Persistence boundary                      │
//! │  ├── leaderboard.rs - Daily scores                           │
//! │  └── schedule.rs - Daily puzzle rotation                     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism
//!
//! Mirror Maze state and Code Breaker scoring are pure functions of
//! their inputs. The only time-dependent pieces (level timer, daily
//! code, leaderboard day) read time through [`core::clock::Clock`], so
//! tests drive them with a fixed or manual clock.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod maze;
pub mod codebreaker;
pub mod store;
pub mod config;

// Re-export commonly used types
pub use core::grid::{Direction, GridPos};
pub use core::clock::{Clock, SystemClock};
pub use maze::{LevelCatalog, MazeEngine, MazeEvent, MoveOutcome};
pub use codebreaker::{generate_daily_code, check_guess, DailyCode, GuessResult};
pub use store::{BlobStore, Game, Leaderboard, MemoryStore};
pub use config::AppConfig;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
