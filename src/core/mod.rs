//! Core deterministic primitives.
//!
//! Shared by both puzzle cores. Nothing in here reads the wall clock
//! directly; time enters only through the [`Clock`] trait.

pub mod grid;
pub mod rng;
pub mod clock;
pub mod hash;

// Re-export core types
pub use grid::{GridPos, Direction};
pub use rng::MinStdRng;
pub use clock::{Clock, SystemClock, FixedClock, ManualClock};
pub use hash::{StateHash, StateHasher};
