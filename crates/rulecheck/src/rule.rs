//! Rule text tokenizing and predicate syntax checks.
//!
//! Rule text is split into clauses, each clause into a predicate name and
//! its argument, and each pair is checked for a well-formed argument before
//! any field value is looked at.

use crate::config::Grammar;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Predicate names understood by the evaluators.
///
/// Any other name maps to [`Predicate::Unknown`] and always passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Predicate {
    /// Exact length of a text value
    Len,
    /// Membership in a list of allowed values
    In,
    /// Lower bound (text length or number)
    Min,
    /// Upper bound (text length or number)
    Max,
    /// Unrecognized name, evaluated as a no-op
    Unknown,
}

impl Predicate {
    /// Look up a predicate by its rule-text name.
    pub fn from_name(name: &str) -> Self {
        match name {
            "len" => Self::Len,
            "in" => Self::In,
            "min" => Self::Min,
            "max" => Self::Max,
            _ => Self::Unknown,
        }
    }

    /// Rule-text name, `"unknown"` for [`Predicate::Unknown`].
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Len => "len",
            Self::In => "in",
            Self::Min => "min",
            Self::Max => "max",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Problem with the rule text itself, independent of any field value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    /// The clause has no pair separator or an empty predicate name.
    #[error("malformed clause {clause:?}")]
    Malformed { clause: String },
    /// The argument is not well formed for the predicate.
    #[error("invalid validator syntax")]
    Syntax { predicate: String, argument: String },
}

impl RuleError {
    fn syntax(predicate: &str, argument: &str) -> Self {
        Self::Syntax {
            predicate: predicate.to_string(),
            argument: argument.to_string(),
        }
    }
}

/// One `predicate:argument` unit of rule text, not yet checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Clause<'a> {
    pub predicate: &'a str,
    pub argument: &'a str,
}

/// A clause whose argument has been parsed for its predicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "predicate", content = "argument", rename_all = "snake_case")]
pub enum Rule<'a> {
    Len(usize),
    /// Allowed values, still as text: integer fields parse them on evaluation.
    In(Vec<&'a str>),
    Min(i64),
    Max(i64),
    Unknown,
}

impl Rule<'_> {
    pub fn predicate(&self) -> Predicate {
        match self {
            Self::Len(_) => Predicate::Len,
            Self::In(_) => Predicate::In,
            Self::Min(_) => Predicate::Min,
            Self::Max(_) => Predicate::Max,
            Self::Unknown => Predicate::Unknown,
        }
    }
}

impl Grammar {
    /// Split rule text into clauses.
    ///
    /// Empty segments are kept, so `"len:3;"` yields a trailing `""` that
    /// later fails as a malformed clause.
    pub fn tokenize<'a>(&self, raw: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        raw.split(self.clause_separator)
    }

    /// Split one clause on the first pair separator.
    ///
    /// The clause is trimmed first. The argument keeps any further
    /// separators verbatim.
    pub fn split_clause<'a>(&self, clause: &'a str) -> Result<Clause<'a>, RuleError> {
        let clause = clause.trim();
        match clause.split_once(self.pair_separator) {
            Some((predicate, argument)) if !predicate.is_empty() => Ok(Clause {
                predicate,
                argument,
            }),
            _ => Err(RuleError::Malformed {
                clause: clause.to_string(),
            }),
        }
    }

    /// Check the argument syntax for a predicate and parse it.
    pub fn parse_rule<'a>(&self, predicate: &str, argument: &'a str) -> Result<Rule<'a>, RuleError> {
        match Predicate::from_name(predicate) {
            Predicate::Len => argument
                .parse::<i64>()
                .ok()
                .and_then(|n| usize::try_from(n).ok())
                .map(Rule::Len)
                .ok_or_else(|| RuleError::syntax(predicate, argument)),
            Predicate::In => {
                if argument.is_empty() {
                    return Err(RuleError::syntax(predicate, argument));
                }
                Ok(Rule::In(argument.split(self.list_separator).collect()))
            }
            Predicate::Min => argument
                .parse::<i64>()
                .map(Rule::Min)
                .map_err(|_| RuleError::syntax(predicate, argument)),
            Predicate::Max => argument
                .parse::<i64>()
                .map(Rule::Max)
                .map_err(|_| RuleError::syntax(predicate, argument)),
            Predicate::Unknown => Ok(Rule::Unknown),
        }
    }

    /// Tokenize, split and parse every clause of `raw`, in order.
    pub fn parse_rules<'a>(&self, raw: &'a str) -> Vec<Result<Rule<'a>, RuleError>> {
        self.tokenize(raw)
            .map(|clause| {
                let clause = self.split_clause(clause)?;
                self.parse_rule(clause.predicate, clause.argument)
            })
            .collect()
    }
}
