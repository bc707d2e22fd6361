//! Checker model
//!
//! A [`Checker`] describes the shape a decoded value must have. The variant set
//! is closed: object records with named fields, homogeneous maps, homogeneous
//! lists and string enumerations. Checker trees are built once from static
//! schema data (see [`crate::schema`]) and are immutable afterwards, so one
//! tree can be shared by reference across every record of a feed.
//!
//! The validation walk lives in [`crate::validate`].

use std::collections::HashSet;
use std::fmt;

use crate::error::{FeedError, Result};
use crate::kind::{PrimitiveKind, ValueKind};

/// What a schema slot expects: a scalar kind or a nested checker
#[derive(Debug, Clone, PartialEq)]
pub enum FieldSpec {
    Primitive(PrimitiveKind),
    Nested(Box<Checker>),
}

impl FieldSpec {
    /// Name of the top-level kind this spec accepts, as shown in usage text
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldSpec::Primitive(kind) => kind.name(),
            FieldSpec::Nested(checker) => checker.expected_kind().name(),
        }
    }
}

impl From<PrimitiveKind> for FieldSpec {
    fn from(kind: PrimitiveKind) -> Self {
        FieldSpec::Primitive(kind)
    }
}

impl From<Checker> for FieldSpec {
    fn from(checker: Checker) -> Self {
        FieldSpec::Nested(Box::new(checker))
    }
}

/// A named slot of an object record
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub spec: FieldSpec,
    /// Names that must not appear on the same record as this field
    pub disallowed: Vec<String>,
}

impl Field {
    pub fn new(name: impl Into<String>, spec: impl Into<FieldSpec>) -> Self {
        Self {
            name: name.into(),
            spec: spec.into(),
            disallowed: Vec::new(),
        }
    }

    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, PrimitiveKind::Text)
    }

    pub fn integer(name: impl Into<String>) -> Self {
        Self::new(name, PrimitiveKind::Integer)
    }

    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, PrimitiveKind::Boolean)
    }

    pub fn any(name: impl Into<String>) -> Self {
        Self::new(name, PrimitiveKind::Any)
    }

    pub fn nested(name: impl Into<String>, checker: Checker) -> Self {
        Self::new(name, checker)
    }

    /// Declare fields that may not co-occur with this one
    pub fn disallowing<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.disallowed.extend(names.into_iter().map(Into::into));
        self
    }
}

/// Object record with required, optional and historical fields.
///
/// Historical fields behave exactly like optional ones; they are kept apart so
/// usage text can flag them as retained for older producers.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeChecker {
    required: Vec<Field>,
    optional: Vec<Field>,
    historical: Vec<Field>,
}

impl CompositeChecker {
    /// Build a composite checker, rejecting any field name declared twice.
    pub fn new(required: Vec<Field>, optional: Vec<Field>, historical: Vec<Field>) -> Result<Self> {
        let mut seen = HashSet::new();
        for field in required.iter().chain(&optional).chain(&historical) {
            if !seen.insert(field.name.as_str()) {
                return Err(FeedError::schema_error(format!(
                    "field '{}' is declared more than once",
                    field.name
                )));
            }
        }
        Ok(Self {
            required,
            optional,
            historical,
        })
    }

    pub fn required(&self) -> &[Field] {
        &self.required
    }

    pub fn optional(&self) -> &[Field] {
        &self.optional
    }

    pub fn historical(&self) -> &[Field] {
        &self.historical
    }

    /// Look up a non-required field (optional or historical) by name
    pub fn optional_field(&self, name: &str) -> Option<&Field> {
        self.optional
            .iter()
            .chain(&self.historical)
            .find(|f| f.name == name)
    }
}

/// Mapping whose every key and every value share one spec
#[derive(Debug, Clone, PartialEq)]
pub struct HomogeneousMapChecker {
    pub key: FieldSpec,
    pub value: FieldSpec,
}

impl HomogeneousMapChecker {
    pub fn new(key: impl Into<FieldSpec>, value: impl Into<FieldSpec>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Sequence whose every element shares one spec
#[derive(Debug, Clone, PartialEq)]
pub struct HomogeneousListChecker {
    pub element: FieldSpec,
}

impl HomogeneousListChecker {
    pub fn new(element: impl Into<FieldSpec>) -> Self {
        Self {
            element: element.into(),
        }
    }
}

/// Text value restricted to a fixed set of strings
#[derive(Debug, Clone, PartialEq)]
pub struct EnumStringChecker {
    pub allowed: Vec<String>,
}

impl EnumStringChecker {
    pub fn new<I, S>(allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed: allowed.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, candidate: &str) -> bool {
        self.allowed.iter().any(|a| a == candidate)
    }
}

/// A composable validator over decoded values
#[derive(Debug, Clone, PartialEq)]
pub enum Checker {
    Composite(CompositeChecker),
    Map(HomogeneousMapChecker),
    List(HomogeneousListChecker),
    EnumString(EnumStringChecker),
}

impl Checker {
    pub fn composite(
        required: Vec<Field>,
        optional: Vec<Field>,
        historical: Vec<Field>,
    ) -> Result<Self> {
        CompositeChecker::new(required, optional, historical).map(Checker::Composite)
    }

    pub fn map(key: impl Into<FieldSpec>, value: impl Into<FieldSpec>) -> Self {
        Checker::Map(HomogeneousMapChecker::new(key, value))
    }

    pub fn list(element: impl Into<FieldSpec>) -> Self {
        Checker::List(HomogeneousListChecker::new(element))
    }

    pub fn one_of<I, S>(allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Checker::EnumString(EnumStringChecker::new(allowed))
    }

    /// Top-level kind of value this checker accepts
    pub fn expected_kind(&self) -> ValueKind {
        match self {
            Checker::Composite(_) | Checker::Map(_) => ValueKind::Object,
            Checker::List(_) => ValueKind::Array,
            Checker::EnumString(_) => ValueKind::String,
        }
    }

    /// Human-readable rendering of the schema, indented four spaces per level
    pub fn describe(&self, indent: usize) -> String {
        match self {
            Checker::Composite(c) => describe_composite(c, indent.max(1)),
            Checker::Map(m) => indented(
                &format!("map of \"{}\":\"{}\"", m.key.type_name(), m.value.type_name()),
                indent,
            ),
            Checker::List(l) => indented(&format!("list of \"{}\"", l.element.type_name()), indent),
            Checker::EnumString(e) => {
                let quoted: Vec<String> = e.allowed.iter().map(|a| format!("\"{}\"", a)).collect();
                indented(&format!("string in [{}]", quoted.join(", ")), indent)
            }
        }
    }
}

impl fmt::Display for Checker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe(1))
    }
}

fn indented(text: &str, indent: usize) -> String {
    format!("\n{}{}", " ".repeat(indent * 4), text)
}

fn describe_composite(checker: &CompositeChecker, indent: usize) -> String {
    let mut out = indented("{", indent - 1);
    describe_fields(&mut out, &checker.required, "required", indent);
    describe_fields(&mut out, &checker.optional, "optional", indent);
    describe_fields(&mut out, &checker.historical, "historical", indent);
    out.push_str(&indented("}", indent - 1));
    out
}

fn describe_fields(out: &mut String, fields: &[Field], label: &str, indent: usize) {
    let mut sorted: Vec<&Field> = fields.iter().collect();
    sorted.sort_by(|a, b| a.name.cmp(&b.name));

    for field in sorted {
        out.push_str(&indented(
            &format!("\"{}\": type \"{}\", {}", field.name, field.spec.type_name(), label),
            indent,
        ));
        if let FieldSpec::Nested(nested) = &field.spec {
            out.push(':');
            out.push_str(&nested.describe(indent + 1));
        }
    }
}
