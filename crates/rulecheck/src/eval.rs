//! Value evaluators for text and integer scalars.

use crate::rule::Rule;
use serde::Serialize;
use thiserror::Error;

/// Why a value failed a well-formed rule.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum Violation {
    #[error("length {actual} does not match required length {expected}")]
    LengthMismatch { expected: usize, actual: usize },
    #[error("length {actual} is less than required {min}")]
    TooShort { min: i64, actual: usize },
    #[error("length {actual} is longer than allowed {max}")]
    TooLong { max: i64, actual: usize },
    #[error("value {value} is not one of [{allowed}]")]
    NotAllowed { value: String, allowed: String },
    #[error("number {value} is less than required {min}")]
    TooSmall { min: i64, value: i128 },
    #[error("number {value} is greater than allowed {max}")]
    TooLarge { max: i64, value: i128 },
}

/// Outcome of a failed evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    /// The argument could not be interpreted for this value type.
    Syntax,
    /// The value broke the rule.
    Violation(Violation),
}

impl From<Violation> for Failure {
    fn from(violation: Violation) -> Self {
        Self::Violation(violation)
    }
}

fn char_len(value: &str) -> i64 {
    i64::try_from(value.chars().count()).unwrap_or(i64::MAX)
}

/// Evaluate a rule against a text value.
///
/// Lengths are counted in characters, not bytes.
pub fn eval_text(value: &str, rule: &Rule<'_>) -> Result<(), Failure> {
    let actual = value.chars().count();
    match rule {
        Rule::Len(expected) if actual != *expected => Err(Violation::LengthMismatch {
            expected: *expected,
            actual,
        }
        .into()),
        Rule::In(allowed) if !allowed.iter().any(|entry| *entry == value) => {
            Err(Violation::NotAllowed {
                value: value.to_string(),
                allowed: allowed.join(","),
            }
            .into())
        }
        Rule::Min(min) if char_len(value) < *min => {
            Err(Violation::TooShort { min: *min, actual }.into())
        }
        Rule::Max(max) if char_len(value) > *max => {
            Err(Violation::TooLong { max: *max, actual }.into())
        }
        _ => Ok(()),
    }
}

/// Evaluate a rule against an integer value.
///
/// `len` has no meaning for numbers and passes. An `in` list entry that is
/// not a base-10 `i64` fails the whole rule with [`Failure::Syntax`].
/// Arguments are widened to `i128` before comparing, so values outside the
/// `i64` range are still checked exactly.
pub fn eval_int(value: i128, rule: &Rule<'_>) -> Result<(), Failure> {
    match rule {
        Rule::In(allowed) => {
            let numbers = allowed
                .iter()
                .map(|entry| entry.parse::<i64>())
                .collect::<Result<Vec<_>, _>>()
                .map_err(|_| Failure::Syntax)?;
            if numbers.iter().any(|n| i128::from(*n) == value) {
                Ok(())
            } else {
                Err(Violation::NotAllowed {
                    value: value.to_string(),
                    allowed: allowed.join(","),
                }
                .into())
            }
        }
        Rule::Min(min) if value < i128::from(*min) => {
            Err(Violation::TooSmall { min: *min, value }.into())
        }
        Rule::Max(max) if value > i128::from(*max) => {
            Err(Violation::TooLarge { max: *max, value }.into())
        }
        _ => Ok(()),
    }
}
