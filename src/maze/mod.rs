//! Mirror Maze
//!
//! Two tokens on one grid; every input moves player 1 one way and
//! player 2 the opposite way. A level is won when both stand on their own
//! goal at the same time.
//!
//! ## Module Structure
//!
//! - `level`: Immutable level records and the catalog
//! - `state`: Per-level mutable state, validate-then-commit moves
//! - `timer`: Per-level stopwatch
//! - `engine`: Session state machine (load, move, win, advance)
//! - `events`: Engine events for the surrounding layer
//! - `solver`: Shortest-solution search
//! - `replay`: Recorded-move verification

pub mod level;
pub mod state;
pub mod timer;
pub mod engine;
pub mod events;
pub mod solver;
pub mod replay;

// Re-export key types
pub use level::{Level, LevelCatalog, LevelError};
pub use state::GameState;
pub use timer::LevelTimer;
pub use engine::{MazeEngine, MazeConfig, MazeError, MazePhase, MoveOutcome};
pub use events::MazeEvent;
pub use solver::solve;
pub use replay::{replay_level, ReplayResult};
