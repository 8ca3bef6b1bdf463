//! # rulecheck
//!
//! Declarative struct-field validation. Each field carries a rule string
//! such as `"len:20"` or `"min:3;max:50"`; [`validate`] checks every field
//! of a record and reports every failure, not just the first.
//!
//! ## Example
//!
//! ```rust
//! use rulecheck::{validate, Record};
//!
//! #[derive(Record)]
//! struct CreateUser {
//!     #[validate("min:3;max:20")]
//!     pub username: String,
//!
//!     #[validate("in:admin,editor,viewer")]
//!     pub role: String,
//!
//!     #[validate("min:18;max:120")]
//!     pub age: u8,
//!
//!     #[validate("max:10")]
//!     pub tags: Vec<String>,
//! }
//!
//! let user = CreateUser {
//!     username: "jo".into(),
//!     role: "owner".into(),
//!     age: 30,
//!     tags: vec!["rust".into()],
//! };
//!
//! let err = validate(&user).unwrap_err();
//! assert_eq!(err.validation_errors().map(|e| e.len()), Some(2));
//! ```
//!
//! ## Rules
//!
//! Rule text is `clause (";" clause)*` with `clause := predicate ":" argument`.
//!
//! | Predicate | Text fields | Integer fields |
//! |-----------|-------------|----------------|
//! | `len:N`   | exactly N characters | ignored |
//! | `in:a,b`  | equals one of the entries | equals one of the entries (parsed as `i64`) |
//! | `min:N`   | at least N characters | at least N |
//! | `max:N`   | at most N characters | at most N |
//!
//! Unknown predicates are accepted and do nothing. Sequence fields (`Vec<T>`,
//! arrays, slices) apply each rule to every element.
//!
//! ## Errors
//!
//! - [`Error::NotAStruct`]: the input is not a struct. Nothing else is checked.
//! - [`Error::Invalid`]: a [`ValidationErrors`] holding, in order, one
//!   [`ValidationError`] per problem: rules on a non-`pub` field, a malformed
//!   clause, an argument with bad syntax, or a value that broke a rule.
//!
//! ## Features
//!
//! - `derive` (default): `#[derive(Record)]`
//! - `tracing` (default): debug and warn logs through `tracing`

mod config;
mod error;
mod eval;
mod field;
mod record;
mod rule;
mod tracing_macros;
mod validate;


pub use config::{Grammar, GrammarError, CLAUSE_SEPARATOR, LIST_SEPARATOR, PAIR_SEPARATOR};
pub use error::{Error, ErrorKind, ValidationError, ValidationErrors};
pub use eval::{eval_int, eval_text, Failure, Violation};
pub use field::{dispatch, AsInteger, ElementKind, FieldDescriptor, FieldValue};
pub use record::{Record, Shape};
pub use rule::{Clause, Predicate, Rule, RuleError};
pub use validate::{validate, Validator};

#[cfg(feature = "derive")]
pub use rulecheck_macros::Record;

/// Prelude module for validation
pub mod prelude {
    pub use crate::error::{Error, ValidationError, ValidationErrors};
    pub use crate::record::{Record, Shape};
    pub use crate::validate::{validate, Validator};

    #[cfg(feature = "derive")]
    pub use rulecheck_macros::Record;
}
