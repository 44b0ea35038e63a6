//! Guess Validation and Scoring
//!
//! Mastermind-style feedback in two passes: exact positions first, then
//! each remaining guess digit claims the leftmost unclaimed matching code
//! digit. No code digit is ever counted twice.

use serde::{Serialize, Deserialize};
use thiserror::Error;

use crate::codebreaker::code::{DailyCode, CODE_LENGTH};

/// Guess rejection reasons. Nothing is scored when these occur.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuessError {
    /// Not exactly five ASCII digits.
    #[error("Invalid guess format. Must be 5 digits.")]
    InvalidFormat,
    /// A digit repeats while the policy requires distinct digits.
    #[error("All digits must be different.")]
    DuplicateDigits,
}

/// Guess acceptance rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessPolicy {
    /// Accept guesses like `11234`
    pub allow_duplicate_digits: bool,
}

impl Default for GuessPolicy {
    fn default() -> Self {
        Self {
            allow_duplicate_digits: false,
        }
    }
}

/// A validated guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Guess {
    digits: [u8; CODE_LENGTH],
}

impl Guess {
    /// Validate raw player input.
    pub fn parse(input: &str, policy: &GuessPolicy) -> Result<Self, GuessError> {
        let bytes = input.as_bytes();
        if bytes.len() != CODE_LENGTH || !bytes.iter().all(u8::is_ascii_digit) {
            return Err(GuessError::InvalidFormat);
        }

        let mut digits = [0u8; CODE_LENGTH];
        for (slot, b) in digits.iter_mut().zip(bytes) {
            *slot = b - b'0';
        }

        if !policy.allow_duplicate_digits {
            let mut seen = [false; 10];
            for &d in &digits {
                if seen[d as usize] {
                    return Err(GuessError::DuplicateDigits);
                }
                seen[d as usize] = true;
            }
        }

        Ok(Self { digits })
    }

    /// The digits, most significant first.
    pub fn digits(&self) -> &[u8; CODE_LENGTH] {
        &self.digits
    }
}

/// Feedback for one guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuessResult {
    /// Right digit, right place
    pub correct_position: u8,
    /// Right digit, wrong place
    pub correct_digit: u8,
    /// All five in place
    pub is_correct: bool,
}

/// Score a validated guess against the code.
pub fn score_guess(guess: &Guess, code: &DailyCode) -> GuessResult {
    score_digits(guess.digits(), code.digits())
}

/// Validate then score.
pub fn check_guess(input: &str, code: &DailyCode, policy: &GuessPolicy) -> Result<GuessResult, GuessError> {
    let guess = Guess::parse(input, policy)?;
    Ok(score_guess(&guess, code))
}

fn score_digits(guess: &[u8; CODE_LENGTH], code: &[u8; CODE_LENGTH]) -> GuessResult {
    let mut guess_used = [false; CODE_LENGTH];
    let mut code_used = [false; CODE_LENGTH];
    let mut correct_position = 0;
    let mut correct_digit = 0;

    // Pass 1: exact matches
    for i in 0..CODE_LENGTH {
        if guess[i] == code[i] {
            correct_position += 1;
            guess_used[i] = true;
            code_used[i] = true;
        }
    }

    // Pass 2: leftmost unclaimed code digit for each remaining guess digit
    for i in 0..CODE_LENGTH {
        if guess_used[i] {
            continue;
        }
        if let Some(j) = (0..CODE_LENGTH).find(|&j| !code_used[j] && guess[i] == code[j]) {
            correct_digit += 1;
            code_used[j] = true;
        }
    }

    GuessResult {
        correct_position,
        correct_digit,
        is_correct: correct_position as usize == CODE_LENGTH,
    }
}

// =============================================================================
// TESTS
// =============================================================================
