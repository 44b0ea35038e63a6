//! Code Breaker
//!
//! Guess a 5-digit code that changes once per UTC day. Each guess gets
//! Mastermind feedback: digits in the right place, and right digits in
//! the wrong place.
//!
//! - `code`: Deterministic daily code
//! - `guess`: Input validation and scoring
//! - `cache`: Per-day memo shared by request handlers

pub mod code;
pub mod guess;
pub mod cache;

pub use code::{generate_daily_code, CodeParseError, DailyCode, CODE_LENGTH};
pub use guess::{check_guess, score_guess, Guess, GuessError, GuessPolicy, GuessResult};
pub use cache::{CachedCode, DailyCodeCache};
