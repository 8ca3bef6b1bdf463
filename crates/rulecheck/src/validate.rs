//! Record-level validation.

use crate::config::{Grammar, GrammarError};
use crate::error::{Error, ValidationError, ValidationErrors};
use crate::field::{dispatch, FieldDescriptor};
use crate::record::{Record, Shape};
use crate::rule::{Rule, RuleError};
use crate::tracing_macros::{trace_debug, trace_trace, trace_warn};

/// Validate a record with the default rule grammar.
///
/// Every field is checked and every failure is reported; only a value that
/// is not a struct stops validation early.
///
/// ## Example
///
/// ```rust
/// use rulecheck::{validate, Error, Record};
///
/// #[derive(Record)]
/// struct Person {
///     #[validate("len:3")]
///     pub name: String,
///     #[validate("in:20,25,30")]
///     pub age: i32,
/// }
///
/// let person = Person { name: "Ann".into(), age: 26 };
/// match validate(&person) {
///     Err(Error::Invalid(errors)) => assert_eq!(errors.len(), 1),
///     other => panic!("unexpected: {other:?}"),
/// }
/// ```
pub fn validate<R: Record + ?Sized>(record: &R) -> Result<(), Error> {
    Validator::default().validate(record)
}

/// Record validator.
///
/// Holds no state besides its [`Grammar`], so one instance can be shared
/// freely across threads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Validator {
    grammar: Grammar,
}

impl Validator {
    /// Validator using the default grammar (`;`, `:`, `,`).
    pub fn new() -> Self {
        Self::default()
    }

    /// Validator using custom separators.
    pub fn with_grammar(grammar: Grammar) -> Result<Self, GrammarError> {
        grammar.check()?;
        Ok(Self { grammar })
    }

    /// Separators this validator splits rule text with.
    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    /// Validate every field of `record` and collect all failures.
    pub fn validate<R: Record + ?Sized>(&self, record: &R) -> Result<(), Error> {
        let fields = match record.shape() {
            Shape::Struct(fields) => fields,
            Shape::Other(found) => {
                trace_debug!(found, "validation input is not a struct");
                return Err(Error::NotAStruct { found });
            }
        };

        trace_debug!(fields = fields.len(), "validating record");

        let mut errors = ValidationErrors::new();
        for field in &fields {
            self.validate_field(field, &mut errors);
        }

        trace_debug!(errors = errors.len(), "record validated");
        errors.into_result().map_err(Error::Invalid)
    }

    /// Validate `record` and hand it back if it passes.
    pub fn validated<R: Record>(&self, record: R) -> Result<R, Error> {
        self.validate(&record)?;
        Ok(record)
    }

    /// Parse rule text without evaluating it.
    pub fn rules_for<'a>(&self, raw: &'a str) -> Vec<Result<Rule<'a>, RuleError>> {
        self.grammar.parse_rules(raw)
    }

    fn validate_field(&self, field: &FieldDescriptor<'_>, errors: &mut ValidationErrors) {
        if field.rules.is_empty() {
            return;
        }

        if !field.public {
            trace_warn!(field = field.name, "rules on non-public field");
            errors.add(ValidationError::UnexportedField {
                field: field.name.to_string(),
            });
            return;
        }

        for clause in self.grammar.tokenize(field.rules) {
            let rule = match self.parse_clause(clause) {
                Ok(rule) => rule,
                Err(err) => {
                    trace_warn!(field = field.name, clause, error = %err, "bad rule");
                    errors.add(rule_error(field.name, err));
                    continue;
                }
            };

            if !rule.applies_to(field.value.kind()) {
                trace_trace!(field = field.name, predicate = %rule.predicate(), "rule skipped");
                continue;
            }

            if let Err(failed) = dispatch(field, &rule) {
                errors.merge(failed);
            }
        }
    }

    fn parse_clause<'a>(&self, clause: &'a str) -> Result<Rule<'a>, RuleError> {
        let clause = self.grammar.split_clause(clause)?;
        self.grammar.parse_rule(clause.predicate, clause.argument)
    }
}

fn rule_error(field: &str, err: RuleError) -> ValidationError {
    match err {
        RuleError::Malformed { clause } => ValidationError::MalformedClause {
            field: field.to_string(),
            clause,
        },
        RuleError::Syntax {
            predicate,
            argument,
        } => ValidationError::InvalidSyntax {
            field: field.to_string(),
            predicate,
            argument,
        },
    }
}
