//! Move Replay
//!
//! Re-applies a recorded move list to a fresh level state. Lets a server
//! check a submitted move count against an actual solve without trusting
//! the client.

use serde::Serialize;

use crate::core::grid::Direction;
use crate::core::hash::{to_hex, StateHash};
use crate::maze::level::Level;
use crate::maze::state::GameState;

/// Result of replaying a move list.
#[derive(Clone, Debug, Serialize)]
pub struct ReplayResult {
    /// State after the last applied move
    pub state: GameState,
    /// Moves that changed the state
    pub applied: u32,
    /// Moves that were blocked
    pub rejected: u32,
    /// Both players ended on their goals
    pub solved: bool,
    /// Digest of the final state
    #[serde(serialize_with = "serialize_hash")]
    pub digest: StateHash,
}

impl ReplayResult {
    /// Digest as lowercase hex.
    pub fn digest_hex(&self) -> String {
        to_hex(&self.digest)
    }
}

fn serialize_hash<S: serde::Serializer>(hash: &StateHash, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&to_hex(hash))
}

/// Replay `moves` on `level`, stopping at the first win.
///
/// Moves after the win are ignored and not counted.
pub fn replay_level(level_index: usize, level: &Level, moves: &[Direction]) -> ReplayResult {
    let mut state = GameState::from_level(level_index, level);
    let mut rejected = 0;

    for dir in moves {
        if state.is_won() {
            break;
        }
        if !state.try_move(*dir) {
            rejected += 1;
        }
    }

    let solved = state.is_won();
    let digest = state.compute_hash();

    ReplayResult {
        applied: state.moves,
        rejected,
        solved,
        digest,
        state,
    }
}
