//! Game State Definitions
//!
//! Mutable per-session maze state. Moves are validated in full before
//! anything is written, so a rejected move leaves the state untouched.

use std::collections::BTreeSet;
use serde::{Serialize, Deserialize};

use crate::core::grid::{Direction, GridPos};
use crate::core::hash::{StateHash, StateHasher};
use crate::maze::level::Level;

/// Live state of one level in progress.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Index into the level catalog
    pub level_index: usize,
    /// Grid width
    pub width: u32,
    /// Grid height
    pub height: u32,
    /// Player 1 position
    pub player1: GridPos,
    /// Player 2 position
    pub player2: GridPos,
    /// Player 1 target
    pub goal1: GridPos,
    /// Player 2 target
    pub goal2: GridPos,
    /// Walls, copied from the level so state edits never reach the catalog
    pub walls: BTreeSet<GridPos>,
    /// Successful moves on this level
    pub moves: u32,
}

impl GameState {
    /// Fresh state for a level.
    pub fn from_level(level_index: usize, level: &Level) -> Self {
        Self {
            level_index,
            width: level.width,
            height: level.height,
            player1: level.player1_start,
            player2: level.player2_start,
            goal1: level.goal1,
            goal2: level.goal2,
            walls: level.walls.clone(),
            moves: 0,
        }
    }

    /// In bounds and not a wall.
    #[inline]
    pub fn is_valid_position(&self, pos: GridPos) -> bool {
        pos.in_bounds(self.width, self.height) && !self.walls.contains(&pos)
    }

    /// Candidate positions for a move: player 1 follows `dir`, player 2
    /// goes the opposite way.
    #[inline]
    pub fn candidates(&self, dir: Direction) -> (GridPos, GridPos) {
        (self.player1.step(dir), self.player2.step_mirrored(dir))
    }

    /// Apply a mirrored move if both destinations are open.
    ///
    /// Returns false (and changes nothing) if either player is blocked.
    pub fn try_move(&mut self, dir: Direction) -> bool {
        let (next1, next2) = self.candidates(dir);
        if !self.is_valid_position(next1) || !self.is_valid_position(next2) {
            return false;
        }
        self.player1 = next1;
        self.player2 = next2;
        self.moves += 1;
        true
    }

    /// Both players stand on their own goals.
    #[inline]
    pub fn is_won(&self) -> bool {
        self.player1 == self.goal1 && self.player2 == self.goal2
    }

    /// Compute hash of current state for verification.
    pub fn compute_hash(&self) -> StateHash {
        let mut hasher = StateHasher::for_maze_state();
        hasher.update_u32(self.level_index as u32);
        hasher.update_u32(self.width);
        hasher.update_u32(self.height);
        hasher.update_pos(self.player1);
        hasher.update_pos(self.player2);
        hasher.update_pos(self.goal1);
        hasher.update_pos(self.goal2);
        // BTreeSet iterates in sorted order
        hasher.update_u32(self.walls.len() as u32);
        for wall in &self.walls {
            hasher.update_pos(*wall);
        }
        hasher.update_u32(self.moves);
        hasher.finalize()
    }
}

// =============================================================================
// TESTS
// =============================================================================
