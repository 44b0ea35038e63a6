//! Deterministic Random Number Generator
//!
//! Park–Miller "minimal standard" Lehmer generator:
//! `state = state * 16807 mod (2^31 - 1)`.
//!
//! The daily Code Breaker answer is derived from this sequence, so the
//! constants and the output order are part of the game's compatibility
//! contract. Changing them changes every player's daily code.

use serde::{Serialize, Deserialize};

/// Multiplier (7^5).
pub const MINSTD_MULTIPLIER: u64 = 16807;

/// Modulus, the Mersenne prime 2^31 - 1.
pub const MINSTD_MODULUS: u64 = 2_147_483_647;

/// Minimal-standard Lehmer PRNG.
///
/// # Example
///
/// ```
/// use daily_puzzles::core::rng::MinStdRng;
///
/// let mut rng = MinStdRng::new(1);
/// assert_eq!(rng.next_u32(), 16807);
/// assert_eq!(rng.next_u32(), 282475249);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinStdRng {
    state: u64,
}

impl MinStdRng {
    /// Create a generator from a seed.
    ///
    /// The seed is reduced modulo 2^31 - 1. Zero is a fixed point of the
    /// recurrence, so a zero residue is replaced with 1.
    pub fn new(seed: u64) -> Self {
        let state = seed % MINSTD_MODULUS;
        Self { state: if state == 0 { 1 } else { state } }
    }

    /// Advance and return the next value in `[1, 2^31 - 1)`.
    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        // state < 2^31 and multiplier < 2^15, so the product fits easily in u64
        self.state = (self.state * MINSTD_MULTIPLIER) % MINSTD_MODULUS;
        self.state as u32
    }

    /// Next decimal digit (`value mod 10`).
    #[inline]
    pub fn next_digit(&mut self) -> u8 {
        (self.next_u32() % 10) as u8
    }

    /// Current state (for checkpointing/debugging).
    pub fn state(&self) -> u64 {
        self.state
    }
}

// =============================================================================
// TESTS
// =============================================================================
