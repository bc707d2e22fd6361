//! Record-level findings
//!
//! A [`Violation`] is an error that makes a record unacceptable for ingestion;
//! a [`Notice`] is a warning the producer should look at but that does not
//! block ingestion. Both render the exact message text through `Display`.

use std::fmt;
use thiserror::Error;

use crate::kind::{PrimitiveKind, ValueKind};

/// Where inside a container a nested violation occurred
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    Field(String),
    Element(usize),
    Key(String),
    Value(String),
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Field(name) => write!(f, "field \"{}\"", name),
            Location::Element(index) => write!(f, "element at index {}", index),
            Location::Key(key) => write!(f, "key \"{}\"", key),
            Location::Value(value) => write!(f, "value \"{}\"", value),
        }
    }
}

/// Which half of a map entry a type mismatch refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryRole {
    Key,
    Value,
}

impl fmt::Display for EntryRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryRole::Key => f.write_str("key"),
            EntryRole::Value => f.write_str("value"),
        }
    }
}

/// An error found while checking a candidate against a checker tree
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    #[error("Expected type: \"{expected}\", but found type: \"{found}\"")]
    KindMismatch { expected: ValueKind, found: ValueKind },

    #[error("Field \"{field}\" had incorrect type. Expected: \"{expected}\" but found: \"{found}\"")]
    FieldType {
        field: String,
        expected: PrimitiveKind,
        found: ValueKind,
    },

    #[error("Element at index {index} had incorrect type. Expected: \"{expected}\" but found: \"{found}\"")]
    ElementType {
        index: usize,
        expected: PrimitiveKind,
        found: ValueKind,
    },

    #[error("{role} \"{rendered}\" had incorrect type. Expected: \"{expected}\" but found: \"{found}\"")]
    EntryType {
        role: EntryRole,
        rendered: String,
        expected: PrimitiveKind,
        found: ValueKind,
    },

    #[error("Did not find required field \"{0}\"")]
    MissingRequiredField(String),

    #[error("Unexpected field \"{0}\" found.")]
    UnexpectedField(String),

    #[error("Fields '{field}' and '{other}' are not allowed to be attached to the same entity.")]
    DisallowedCoOccurrence { field: String, other: String },

    #[error("Element \"{value}\" was not in list {}", format_allowed(.allowed))]
    NotInSet { value: String, allowed: Vec<String> },

    #[error("Found error in {location}: {inner}")]
    Nested {
        location: Location,
        inner: Box<Violation>,
    },
}

impl Violation {
    pub fn nested(location: Location, inner: Violation) -> Self {
        Violation::Nested {
            location,
            inner: Box::new(inner),
        }
    }
}

fn format_allowed(allowed: &[String]) -> String {
    let quoted: Vec<String> = allowed.iter().map(|a| format!("\"{}\"", a)).collect();
    format!("[{}]", quoted.join(", "))
}

/// A warning found while checking a candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// A required slot was present but held a blank entry
    InvalidRequiredEntry { name: String, rendered: String },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::InvalidRequiredEntry { name, rendered } => write!(
                f,
                "\"{}\" was required, but found an invalid entry of \"{}\"",
                name, rendered
            ),
        }
    }
}

/// Errors and warnings collected for one candidate, in depth-first order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    pub errors: Vec<Violation>,
    pub warnings: Vec<Notice>,
}

impl Outcome {
    pub fn new() -> Self {
        Self::default()
    }

    /// Outcome holding a single error and no warnings
    pub fn failure(violation: Violation) -> Self {
        Self {
            errors: vec![violation],
            warnings: Vec::new(),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn push_error(&mut self, violation: Violation) {
        self.errors.push(violation);
    }

    pub fn push_warning(&mut self, notice: Notice) {
        self.warnings.push(notice);
    }

    /// Append a nested outcome, wrapping each of its errors with `location`.
    /// Warnings are carried over unchanged.
    pub fn absorb_nested(&mut self, location: &Location, nested: Outcome) {
        self.errors.extend(
            nested
                .errors
                .into_iter()
                .map(|e| Violation::nested(location.clone(), e)),
        );
        self.warnings.extend(nested.warnings);
    }

    /// Error messages rendered as text
    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    /// Warning messages rendered as text
    pub fn warning_messages(&self) -> Vec<String> {
        self.warnings.iter().map(ToString::to_string).collect()
    }
}
