//! Daily Code Generation
//!
//! The daily answer is a pure function of the UTC calendar date:
//!
//! 1. seed = the date as the integer `YYYYMMDD`
//! 2. step the minimal-standard LCG (`seed = seed * 16807 mod 2^31 - 1`)
//! 3. keep `seed mod 10` if it has not been seen yet
//! 4. stop at five distinct digits, in first-seen order
//!
//! This is a compatibility contract: changing any step changes the answer
//! every player sees for every day.

use std::fmt;
use std::str::FromStr;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::core::rng::MinStdRng;

/// Number of digits in a code.
pub const CODE_LENGTH: usize = 5;

/// Why a string is not a valid code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodeParseError {
    /// Not exactly five ASCII digits.
    #[error("code must be 5 digits, got {0:?}")]
    InvalidFormat(String),
    /// A digit repeats.
    #[error("code digits must be distinct, got {0:?}")]
    DuplicateDigits(String),
}

/// A 5-digit code with all digits distinct.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DailyCode {
    digits: [u8; CODE_LENGTH],
}

impl DailyCode {
    /// Build from digits. `None` unless every digit is 0-9 and distinct.
    pub fn from_digits(digits: [u8; CODE_LENGTH]) -> Option<Self> {
        let mut seen = [false; 10];
        for &d in &digits {
            if d > 9 || seen[d as usize] {
                return None;
            }
            seen[d as usize] = true;
        }
        Some(Self { digits })
    }

    /// The digits, most significant first.
    pub fn digits(&self) -> &[u8; CODE_LENGTH] {
        &self.digits
    }
}

impl fmt::Display for DailyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for d in self.digits {
            write!(f, "{}", d)?;
        }
        Ok(())
    }
}

impl FromStr for DailyCode {
    type Err = CodeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != CODE_LENGTH || !bytes.iter().all(u8::is_ascii_digit) {
            return Err(CodeParseError::InvalidFormat(s.to_string()));
        }
        let mut digits = [0u8; CODE_LENGTH];
        for (slot, b) in digits.iter_mut().zip(bytes) {
            *slot = b - b'0';
        }
        Self::from_digits(digits).ok_or_else(|| CodeParseError::DuplicateDigits(s.to_string()))
    }
}

impl Serialize for DailyCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DailyCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// `YYYYMMDD` as an integer, e.g. 2024-01-15 → 20240115.
pub fn date_seed(date: NaiveDate) -> u64 {
    let value = date.year() as i64 * 10_000 + date.month() as i64 * 100 + date.day() as i64;
    value.unsigned_abs()
}

/// Derive the code for a calendar day.
pub fn generate_daily_code(date: NaiveDate) -> DailyCode {
    let mut rng = MinStdRng::new(date_seed(date));
    let mut digits = [0u8; CODE_LENGTH];
    let mut seen = [false; 10];
    let mut filled = 0;

    while filled < CODE_LENGTH {
        let d = rng.next_digit();
        if !seen[d as usize] {
            seen[d as usize] = true;
            digits[filled] = d;
            filled += 1;
        }
    }

    DailyCode { digits }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_date_seed() {
        assert_eq!(date_seed(day(2024, 1, 15)), 20240115);
        assert_eq!(date_seed(day(1999, 12, 31)), 19991231);
    }

    #[test]
    fn test_known_codes() {
        // These values must never change!
        // If they do, every player's daily answer changes.
        assert_eq!(generate_daily_code(day(2024, 1, 15)).to_string(), "92307");
        assert_eq!(generate_daily_code(day(2024, 1, 16)).to_string(), "64510");
        assert_eq!(generate_daily_code(day(2024, 2, 29)).to_string(), "73910");
        assert_eq!(generate_daily_code(day(2025, 12, 31)).to_string(), "15467");
    }

    #[test]
    fn test_pure_function_of_date() {
        let date = day(2024, 1, 15);
        assert_eq!(generate_daily_code(date), generate_daily_code(date));
    }

    #[test]
    fn test_digits_distinct_over_many_days() {
        let mut date = day(2020, 1, 1);
        for _ in 0..2000 {
            let code = generate_daily_code(date);
            assert!(DailyCode::from_digits(*code.digits()).is_some(), "{} on {}", code, date);
            date = date.succ_opt().unwrap();
        }
    }

    #[test]
    fn test_from_digits_validation() {
        assert!(DailyCode::from_digits([1, 2, 3, 4, 5]).is_some());
        assert!(DailyCode::from_digits([1, 1, 3, 4, 5]).is_none());
        assert!(DailyCode::from_digits([1, 2, 3, 4, 10]).is_none());
    }

    #[test]
    fn test_parse_and_serde() {
        let code: DailyCode = "04213".parse().unwrap();
        assert_eq!(code.digits(), &[0, 4, 2, 1, 3]);
        assert_eq!(serde_json::to_string(&code).unwrap(), "\"04213\"");

        let back: DailyCode = serde_json::from_str("\"04213\"").unwrap();
        assert_eq!(back, code);

        assert_eq!("0421".parse::<DailyCode>(), Err(CodeParseError::InvalidFormat("0421".into())));
        assert_eq!("04a13".parse::<DailyCode>(), Err(CodeParseError::InvalidFormat("04a13".into())));
        assert_eq!("04413".parse::<DailyCode>(), Err(CodeParseError::DuplicateDigits("04413".into())));

        let err = serde_json::from_str::<DailyCode>("\"04413\"").unwrap_err();
        assert!(err.to_string().contains("distinct"));
    }
}
