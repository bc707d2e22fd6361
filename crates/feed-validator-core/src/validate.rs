//! Validation algorithm
//!
//! Walks a [`Checker`] tree against a decoded candidate. Every call first
//! compares the candidate's kind with the checker's expected kind and stops
//! there on mismatch; otherwise it dispatches on the checker variant.
//! Findings are appended in depth-first order and nothing is mutated.
//!
//! Integers written as text are accepted for object fields and map entries
//! but not for list elements.

use serde_json::{Map, Value};
use std::collections::HashSet;

use crate::checker::{
    Checker, CompositeChecker, EnumStringChecker, Field, FieldSpec, HomogeneousListChecker,
    HomogeneousMapChecker,
};
use crate::kind::{is_valid_entry, render, ValueKind};
use crate::violation::{EntryRole, Location, Notice, Outcome, Violation};

impl Checker {
    /// Check `candidate` against this checker.
    ///
    /// `required` is propagated from the enclosing slot and decides whether
    /// blank entries produce warnings.
    pub fn validate(&self, candidate: &Value, required: bool) -> Outcome {
        let found = ValueKind::of(candidate);
        let expected = self.expected_kind();
        if found != expected {
            return Outcome::failure(Violation::KindMismatch { expected, found });
        }

        match (self, candidate) {
            (Checker::Composite(c), Value::Object(obj)) => validate_composite(c, obj),
            (Checker::Map(m), Value::Object(obj)) => validate_map(m, obj, required),
            (Checker::List(l), Value::Array(items)) => validate_list(l, items, required),
            (Checker::EnumString(e), Value::String(s)) => validate_enum(e, s),
            // Unreachable once the kinds agree
            _ => Outcome::failure(Violation::KindMismatch { expected, found }),
        }
    }
}

fn validate_composite(checker: &CompositeChecker, candidate: &Map<String, Value>) -> Outcome {
    let mut outcome = Outcome::new();
    let mut visited: HashSet<&str> = HashSet::new();

    for field in checker.required() {
        match candidate.get(&field.name) {
            Some(value) => {
                visited.insert(field.name.as_str());
                check_field(&mut outcome, field, value, candidate, true);
            }
            None => outcome.push_error(Violation::MissingRequiredField(field.name.clone())),
        }
    }

    for (name, value) in candidate {
        if visited.contains(name.as_str()) {
            continue;
        }
        match checker.optional_field(name) {
            Some(field) => check_field(&mut outcome, field, value, candidate, false),
            None => outcome.push_error(Violation::UnexpectedField(name.clone())),
        }
    }

    outcome
}

/// Check one object field. `record` is the whole candidate object, so
/// co-occurrence is judged against every key it carries.
fn check_field(
    outcome: &mut Outcome,
    field: &Field,
    value: &Value,
    record: &Map<String, Value>,
    required: bool,
) {
    match &field.spec {
        FieldSpec::Nested(checker) => {
            let nested = checker.validate(value, required);
            outcome.absorb_nested(&Location::Field(field.name.clone()), nested);
        }
        FieldSpec::Primitive(kind) => {
            if !kind.accepts_coerced(value) {
                outcome.push_error(Violation::FieldType {
                    field: field.name.clone(),
                    expected: *kind,
                    found: ValueKind::of(value),
                });
            }
        }
    }

    if required && !is_valid_entry(value) {
        outcome.push_warning(Notice::InvalidRequiredEntry {
            name: field.name.clone(),
            rendered: render(value),
        });
    }

    for other in &field.disallowed {
        if record.contains_key(other) {
            outcome.push_error(Violation::DisallowedCoOccurrence {
                field: field.name.clone(),
                other: other.clone(),
            });
        }
    }
}

fn validate_map(
    checker: &HomogeneousMapChecker,
    candidate: &Map<String, Value>,
    required: bool,
) -> Outcome {
    let mut outcome = Outcome::new();
    for (key, value) in candidate {
        let key = Value::String(key.clone());
        check_entry(&mut outcome, EntryRole::Key, &key, &checker.key, required);
        check_entry(&mut outcome, EntryRole::Value, value, &checker.value, required);
    }
    outcome
}

fn check_entry(
    outcome: &mut Outcome,
    role: EntryRole,
    value: &Value,
    spec: &FieldSpec,
    required: bool,
) {
    match spec {
        FieldSpec::Nested(checker) => {
            let location = match role {
                EntryRole::Key => Location::Key(render(value)),
                EntryRole::Value => Location::Value(render(value)),
            };
            outcome.absorb_nested(&location, checker.validate(value, required));
        }
        FieldSpec::Primitive(kind) => {
            if !kind.accepts_coerced(value) {
                outcome.push_error(Violation::EntryType {
                    role,
                    rendered: render(value),
                    expected: *kind,
                    found: ValueKind::of(value),
                });
            }
        }
    }

    if required && !is_valid_entry(value) {
        outcome.push_warning(Notice::InvalidRequiredEntry {
            name: role.to_string(),
            rendered: render(value),
        });
    }
}

fn validate_list(checker: &HomogeneousListChecker, items: &[Value], required: bool) -> Outcome {
    let mut outcome = Outcome::new();
    for (index, item) in items.iter().enumerate() {
        match &checker.element {
            FieldSpec::Nested(nested) => {
                outcome.absorb_nested(&Location::Element(index), nested.validate(item, required));
            }
            FieldSpec::Primitive(kind) => {
                let found = ValueKind::of(item);
                if !kind.accepts(found) {
                    outcome.push_error(Violation::ElementType {
                        index,
                        expected: *kind,
                        found,
                    });
                }
            }
        }
    }
    outcome
}

fn validate_enum(checker: &EnumStringChecker, candidate: &str) -> Outcome {
    if checker.contains(candidate) {
        Outcome::new()
    } else {
        Outcome::failure(Violation::NotInSet {
            value: candidate.to_string(),
            allowed: checker.allowed.clone(),
        })
    }
}
