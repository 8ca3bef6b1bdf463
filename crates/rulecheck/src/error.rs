//! Error types and the aggregated validation report.

use crate::eval::Violation;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Error returned by [`validate`](crate::validate).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The input is not a struct with named fields. No field was inspected.
    #[error("wrong argument given, should be a struct (got {found})")]
    NotAStruct { found: &'static str },
    /// One or more fields failed. Holds every failure, in order.
    #[error(transparent)]
    Invalid(#[from] ValidationErrors),
}

impl Error {
    /// The collected field errors, if this is not a shape error.
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Invalid(errors) => Some(errors),
            Self::NotAStruct { .. } => None,
        }
    }
}

/// Kind of a [`ValidationError`], for filtering a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    UnexportedField,
    MalformedClause,
    InvalidSyntax,
    Violation,
}

/// A single failure found while validating one field.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationError {
    /// A non-public field carries rules.
    #[error("validation for unexported field is not allowed")]
    UnexportedField { field: String },
    /// A clause did not split into predicate and argument.
    #[error("malformed field {field}")]
    MalformedClause { field: String, clause: String },
    /// A clause argument is not well formed for its predicate.
    #[error("invalid validator syntax")]
    InvalidSyntax {
        field: String,
        predicate: String,
        argument: String,
    },
    /// A value broke a rule. `index` is the element position for sequence fields.
    #[error("error with field {field}: {violation}")]
    Violation {
        field: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        index: Option<usize>,
        violation: Violation,
    },
}

impl ValidationError {
    /// Name of the field the error belongs to.
    pub fn field(&self) -> &str {
        match self {
            Self::UnexportedField { field }
            | Self::MalformedClause { field, .. }
            | Self::InvalidSyntax { field, .. }
            | Self::Violation { field, .. } => field,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnexportedField { .. } => ErrorKind::UnexportedField,
            Self::MalformedClause { .. } => ErrorKind::MalformedClause,
            Self::InvalidSyntax { .. } => ErrorKind::InvalidSyntax,
            Self::Violation { .. } => ErrorKind::Violation,
        }
    }
}

/// Ordered collection of every failure found in one record.
///
/// Order is field declaration order, then clause order, then element order.
///
/// `Display` renders nothing for an empty collection, the single message for
/// one error, and every message joined by newlines otherwise.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Append an error.
    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Append every error of `other`, keeping its order.
    pub fn merge(&mut self, other: ValidationErrors) {
        self.errors.extend(other.errors);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Total number of errors.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.errors.iter()
    }

    /// Errors recorded for one field.
    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a ValidationError> {
        self.errors.iter().filter(move |e| e.field() == field)
    }

    /// Number of errors of one kind.
    pub fn count_kind(&self, kind: ErrorKind) -> usize {
        self.errors.iter().filter(|e| e.kind() == kind).count()
    }

    /// `Ok` if empty, `Err(self)` otherwise.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    pub fn into_vec(self) -> Vec<ValidationError> {
        self.errors
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        Self {
            errors: vec![error],
        }
    }
}

impl FromIterator<ValidationError> for ValidationErrors {
    fn from_iter<I: IntoIterator<Item = ValidationError>>(iter: I) -> Self {
        Self {
            errors: iter.into_iter().collect(),
        }
    }
}

impl Extend<ValidationError> for ValidationErrors {
    fn extend<I: IntoIterator<Item = ValidationError>>(&mut self, iter: I) {
        self.errors.extend(iter);
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}
