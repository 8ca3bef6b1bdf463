//! Rule grammar configuration.
//!
//! The wire grammar for field rules is `clause (";" clause)*` with
//! `clause := predicate ":" argument`, and `in` lists separated by `,`.
//! [`Grammar`] names those three separators so a caller that embeds rule
//! text inside another format (for example a config file that already uses
//! `;`) can pick different ones.
//!
//! # Example
//!
//! ```rust
//! use rulecheck::{Grammar, Validator};
//!
//! let grammar: Grammar = serde_json::from_str(r#"{ "clause_separator": "|" }"#).unwrap();
//! assert_eq!(grammar.pair_separator, ':');
//!
//! let validator = Validator::with_grammar(grammar).unwrap();
//! # let _ = validator;
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default separator between clauses.
pub const CLAUSE_SEPARATOR: char = ';';
/// Default separator between a predicate and its argument.
pub const PAIR_SEPARATOR: char = ':';
/// Default separator between the entries of an `in` list.
pub const LIST_SEPARATOR: char = ',';

/// Error returned when a [`Grammar`] cannot be used to tokenize rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    /// Two roles share the same separator character.
    #[error("separator {separator:?} is used for both {first} and {second}")]
    Ambiguous {
        separator: char,
        first: &'static str,
        second: &'static str,
    },
    /// Clauses are trimmed, so whitespace can never delimit anything.
    #[error("{role} separator must not be whitespace")]
    Whitespace { role: &'static str },
}

/// Separators used to tokenize rule text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Grammar {
    /// Splits rule text into clauses (default `;`)
    pub clause_separator: char,
    /// Splits a clause into predicate and argument (default `:`)
    pub pair_separator: char,
    /// Splits an `in` argument into allowed values (default `,`)
    pub list_separator: char,
}

impl Default for Grammar {
    fn default() -> Self {
        Self {
            clause_separator: CLAUSE_SEPARATOR,
            pair_separator: PAIR_SEPARATOR,
            list_separator: LIST_SEPARATOR,
        }
    }
}

impl Grammar {
    /// Check that the separators are distinct and not whitespace.
    pub fn check(&self) -> Result<(), GrammarError> {
        let roles = [
            ("clause", self.clause_separator),
            ("pair", self.pair_separator),
            ("list", self.list_separator),
        ];

        for (role, separator) in roles {
            if separator.is_whitespace() {
                return Err(GrammarError::Whitespace { role });
            }
        }

        for (i, (first, a)) in roles.iter().enumerate() {
            for (second, b) in &roles[i + 1..] {
                if a == b {
                    return Err(GrammarError::Ambiguous {
                        separator: *a,
                        first,
                        second,
                    });
                }
            }
        }

        Ok(())
    }
}
