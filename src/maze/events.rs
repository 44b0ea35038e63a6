//! Maze Events
//!
//! Emitted by the engine so the surrounding layer (renderer, leaderboard
//! submitter) can react without polling state.

use std::time::Duration;
use serde::{Serialize, Deserialize};

use crate::core::grid::{Direction, GridPos};

/// Something that happened inside the engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MazeEvent {
    /// A level was (re)loaded and its timer started
    LevelLoaded {
        /// Catalog index
        level_index: usize,
    },

    /// Both players moved
    PlayersMoved {
        /// Input direction (player 1's)
        direction: Direction,
        /// Player 1 after the move
        player1: GridPos,
        /// Player 2 after the move
        player2: GridPos,
        /// Moves on this level so far
        moves: u32,
    },

    /// Both players reached their goals
    LevelWon {
        /// Catalog index
        level_index: usize,
        /// Recorded level time
        elapsed: Duration,
        /// Moves on the level
        moves: u32,
    },

    /// The final level was won
    GameCompleted {
        /// Sum of every level duration in the run
        total: Duration,
        /// Moves across the run
        total_moves: u32,
    },
}

impl MazeEvent {
    /// Short name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            MazeEvent::LevelLoaded { .. } => "level_loaded",
            MazeEvent::PlayersMoved { .. } => "players_moved",
            MazeEvent::LevelWon { .. } => "level_won",
            MazeEvent::GameCompleted { .. } => "game_completed",
        }
    }
}
