//! Field descriptors and per-field rule dispatch.

use crate::error::{ValidationError, ValidationErrors};
use crate::eval::{eval_int, eval_text, Failure};
use crate::rule::{Predicate, Rule};

/// Scalar category a field's values are evaluated as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Text,
    Integer,
    /// Anything else. Rules on such fields are ignored.
    Unsupported,
}

/// Current value of a field, borrowed from the record.
///
/// Integers of every primitive width are carried as `i128`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Integer(i128),
    TextSeq(Vec<&'a str>),
    IntegerSeq(Vec<i128>),
    Unsupported,
}

impl FieldValue<'_> {
    /// Category each value (or each element) is evaluated as.
    pub fn kind(&self) -> ElementKind {
        match self {
            Self::Text(_) | Self::TextSeq(_) => ElementKind::Text,
            Self::Integer(_) | Self::IntegerSeq(_) => ElementKind::Integer,
            Self::Unsupported => ElementKind::Unsupported,
        }
    }

    /// Whether rules apply per element.
    pub fn is_sequence(&self) -> bool {
        matches!(self, Self::TextSeq(_) | Self::IntegerSeq(_))
    }
}

/// Conversion of a primitive integer to `i128` for evaluation.
///
/// Used by `#[derive(Record)]` to read integer fields. Every type except
/// `u128` converts losslessly. `u128` values above `i128::MAX` saturate,
/// which keeps every comparison against an `i64` rule argument exact.
pub trait AsInteger {
    fn as_integer(&self) -> i128;
}

macro_rules! impl_as_integer {
    ($($ty:ty),*) => {
        $(
            impl AsInteger for $ty {
                fn as_integer(&self) -> i128 {
                    i128::from(*self)
                }
            }
        )*
    };
}

impl_as_integer!(i8, i16, i32, i64, i128, u8, u16, u32, u64);

// Pointer-sized integers are at most 64 bits wide on supported targets.
impl AsInteger for isize {
    fn as_integer(&self) -> i128 {
        *self as i128
    }
}

impl AsInteger for usize {
    fn as_integer(&self) -> i128 {
        *self as i128
    }
}

impl AsInteger for u128 {
    fn as_integer(&self) -> i128 {
        i128::try_from(*self).unwrap_or(i128::MAX)
    }
}

/// Everything the validator needs to know about one field.
///
/// Built by `#[derive(Record)]`, or by hand in a manual
/// [`Record`](crate::Record) impl:
///
/// ```rust
/// use rulecheck::{FieldDescriptor, FieldValue};
///
/// let name = String::from("bob");
/// let field = FieldDescriptor::new("name", FieldValue::Text(&name)).rules("min:2;max:32");
/// assert!(field.public);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor<'a> {
    pub name: &'a str,
    /// Whether the field is part of the record's public contract
    pub public: bool,
    /// Raw rule text, empty when the field has no rules
    pub rules: &'a str,
    pub value: FieldValue<'a>,
}

impl<'a> FieldDescriptor<'a> {
    /// A public field with no rules.
    pub fn new(name: &'a str, value: FieldValue<'a>) -> Self {
        Self {
            name,
            public: true,
            rules: "",
            value,
        }
    }

    pub fn public(mut self, public: bool) -> Self {
        self.public = public;
        self
    }

    pub fn rules(mut self, rules: &'a str) -> Self {
        self.rules = rules;
        self
    }
}

/// Evaluate one parsed rule against a field.
///
/// Scalars are evaluated once. Sequences are evaluated element by element
/// and every failing element adds its own error. An integer `in` list that
/// does not parse is reported once for the whole field.
pub fn dispatch(field: &FieldDescriptor<'_>, rule: &Rule<'_>) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    match &field.value {
        FieldValue::Text(value) => {
            if let Err(failure) = eval_text(value, rule) {
                errors.add(failure_error(field.name, rule, None, failure));
            }
        }
        FieldValue::Integer(value) => {
            if let Err(failure) = eval_int(*value, rule) {
                errors.add(failure_error(field.name, rule, None, failure));
            }
        }
        FieldValue::TextSeq(values) => {
            for (index, value) in values.iter().enumerate() {
                if let Err(failure) = eval_text(value, rule) {
                    let stop = failure == Failure::Syntax;
                    errors.add(failure_error(field.name, rule, Some(index), failure));
                    if stop {
                        break;
                    }
                }
            }
        }
        FieldValue::IntegerSeq(values) => {
            for (index, value) in values.iter().enumerate() {
                if let Err(failure) = eval_int(*value, rule) {
                    let stop = failure == Failure::Syntax;
                    errors.add(failure_error(field.name, rule, Some(index), failure));
                    if stop {
                        break;
                    }
                }
            }
        }
        FieldValue::Unsupported => {}
    }

    errors.into_result()
}

fn failure_error(
    field: &str,
    rule: &Rule<'_>,
    index: Option<usize>,
    failure: Failure,
) -> ValidationError {
    match failure {
        Failure::Syntax => ValidationError::InvalidSyntax {
            field: field.to_string(),
            predicate: rule.predicate().as_str().to_string(),
            argument: rule_argument(rule),
        },
        Failure::Violation(violation) => ValidationError::Violation {
            field: field.to_string(),
            index,
            violation,
        },
    }
}

fn rule_argument(rule: &Rule<'_>) -> String {
    match rule {
        Rule::Len(n) => n.to_string(),
        Rule::In(values) => values.join(","),
        Rule::Min(n) | Rule::Max(n) => n.to_string(),
        Rule::Unknown => String::new(),
    }
}

impl Rule<'_> {
    /// Whether this rule can do anything on a value of `kind`.
    pub fn applies_to(&self, kind: ElementKind) -> bool {
        match (kind, self.predicate()) {
            (ElementKind::Unsupported, _) | (_, Predicate::Unknown) => false,
            (ElementKind::Integer, Predicate::Len) => false,
            _ => true,
        }
    }
}
