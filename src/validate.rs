//! Field validation for operator input.
//!
//! Every validator is pure and works on one raw line. Empty input always
//! means the operator backed out (`Validated::Cancelled`). Malformed input
//! is `Validated::Invalid` with the reason; whether that reason is shown
//! is up to the caller.
//!
//! ```
//! use vintage_cars::validate::{validate_convertible, validate_production_year, Validated};
//!
//! assert_eq!(validate_production_year("1965"), Validated::Valid(1965));
//! assert!(validate_production_year("1899").valid().is_none());
//! assert_eq!(validate_convertible("y"), Validated::Valid(true));
//! assert_eq!(validate_convertible(""), Validated::Cancelled);
//! ```

use crate::api::CarId;
use std::ops::RangeInclusive;
use thiserror::Error;

pub const PRODUCTION_YEARS: RangeInclusive<i64> = 1900..=2000;

pub const YES: &str = "y";
pub const NO: &str = "n";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validated<T> {
    Cancelled,
    Invalid(InvalidInput),
    Valid(T),
}

impl<T> Validated<T> {
    /// The value, if there is one. Cancellation and invalid input both
    /// collapse to `None`.
    pub fn valid(self) -> Option<T> {
        match self {
            Validated::Valid(value) => Some(value),
            Validated::Cancelled | Validated::Invalid(_) => None,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidInput {
    #[error("Invalid characters")]
    InvalidCharacter(char),

    #[error("not a number: {0:?}")]
    NotANumber(String),

    #[error("identifier must be positive, got {0}")]
    NotPositive(i64),

    #[error("production year {0} is outside 1900..2000")]
    YearOutOfRange(i64),

    #[error("expected 'y' or 'n', got {0:?}")]
    NotYesNo(String),
}

fn parse_number(raw: &str) -> Result<i64, InvalidInput> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| InvalidInput::NotANumber(raw.to_string()))
}

/// Car identifier: a positive integer. Surrounding whitespace is ignored.
pub fn validate_identifier(raw: &str) -> Validated<CarId> {
    if raw.is_empty() {
        return Validated::Cancelled;
    }
    match parse_number(raw) {
        Ok(n) if n > 0 => Validated::Valid(n as CarId),
        Ok(n) => Validated::Invalid(InvalidInput::NotPositive(n)),
        Err(e) => Validated::Invalid(e),
    }
}

/// Brand or model name: letters, digits and whitespace only.
pub fn validate_name(raw: &str) -> Validated<String> {
    if raw.is_empty() {
        return Validated::Cancelled;
    }
    match raw
        .chars()
        .find(|c| !c.is_alphanumeric() && !c.is_whitespace())
    {
        Some(bad) => Validated::Invalid(InvalidInput::InvalidCharacter(bad)),
        None => Validated::Valid(raw.to_string()),
    }
}

/// Production year within [`PRODUCTION_YEARS`].
pub fn validate_production_year(raw: &str) -> Validated<u16> {
    if raw.is_empty() {
        return Validated::Cancelled;
    }
    match parse_number(raw) {
        Ok(year) if PRODUCTION_YEARS.contains(&year) => Validated::Valid(year as u16),
        Ok(year) => Validated::Invalid(InvalidInput::YearOutOfRange(year)),
        Err(e) => Validated::Invalid(e),
    }
}

/// Exactly [`YES`] or [`NO`]; nothing is trimmed or case-folded.
pub fn validate_convertible(raw: &str) -> Validated<bool> {
    match raw {
        "" => Validated::Cancelled,
        YES => Validated::Valid(true),
        NO => Validated::Valid(false),
        other => Validated::Invalid(InvalidInput::NotYesNo(other.to_string())),
    }
}
